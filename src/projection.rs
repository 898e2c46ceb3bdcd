//! # Response Projection
//!
//! Maps cart and order records to the shapes returned by the HTTP API. The mapping
//! itself is pure ([`CartView::build`], [`OrderView::new`]); the `load_*` helpers fetch
//! the denormalized fields (meal name, chef name, image, counterpart names) at read
//! time, so they always reflect the catalog and account directory as they are now.

use crate::account_actor::AccountError;
use crate::catalog_actor::{Catalog, CatalogError};
use crate::clients::AccountClient;
use crate::model::{
    Cart, CartItemId, DeliveryAddress, MealId, Order, OrderId, OrderStatus, PaymentResult, UserId,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Account(#[from] AccountError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub id: CartItemId,
    pub meal_id: MealId,
    pub name: String,
    pub chef_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    pub image: Option<String>,
    pub special_instructions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoView {
    pub code: String,
    pub discount: u32,
    /// `totalPrice × discount / 100` rounded to cents, half up. A sub-cent result is
    /// never exact: 50% of 0.05 is 0.03.
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_amount: Decimal,
    /// `totalPrice - discountAmount`, so the two always add back to the total.
    #[serde(with = "rust_decimal::serde::float")]
    pub final_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItemView>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    /// `null` unless a promo is applied and still active.
    pub promo_code: Option<PromoView>,
}

/// Read-time details of a meal shown next to a cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct MealDetails {
    pub name: String,
    pub chef_name: String,
    pub image: Option<String>,
}

impl MealDetails {
    fn unavailable() -> Self {
        Self {
            name: "Unavailable meal".into(),
            chef_name: UNKNOWN_NAME.into(),
            image: None,
        }
    }
}

impl CartView {
    pub fn build(cart: &Cart, details: &HashMap<MealId, MealDetails>, now: DateTime<Utc>) -> Self {
        let fallback = MealDetails::unavailable();
        let items = cart
            .items
            .iter()
            .map(|item| {
                let meal = details.get(&item.meal_id).unwrap_or(&fallback);
                CartItemView {
                    id: item.id,
                    meal_id: item.meal_id,
                    name: meal.name.clone(),
                    chef_name: meal.chef_name.clone(),
                    price: item.unit_price,
                    quantity: item.quantity,
                    image: meal.image.clone(),
                    special_instructions: item.special_instructions.clone(),
                }
            })
            .collect();

        let pricing = cart.pricing(now);
        Self {
            items,
            total_price: pricing.subtotal,
            promo_code: pricing.discount.map(|d| PromoView {
                code: d.code,
                discount: d.percent,
                discount_amount: d.amount,
                final_price: d.final_price,
            }),
        }
    }
}

/// Projects a cart, looking up each meal and its chef's name.
///
/// A meal that has left the catalog is shown as unavailable rather than failing the read.
pub async fn load_cart_view(
    cart: &Cart,
    catalog: &dyn Catalog,
    accounts: &AccountClient,
    now: DateTime<Utc>,
) -> Result<CartView, ProjectionError> {
    let mut details = HashMap::new();
    let mut names = NameCache::new(accounts);
    for item in &cart.items {
        if details.contains_key(&item.meal_id) {
            continue;
        }
        let meal = match catalog.find_meal(item.meal_id).await {
            Ok(meal) => meal,
            Err(CatalogError::NotFound(_)) => {
                warn!(meal = %item.meal_id, owner = %cart.owner, "Cart references a missing meal");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        details.insert(
            item.meal_id,
            MealDetails {
                name: meal.name,
                chef_name: names.get(meal.chef_id).await?,
                image: meal.image,
            },
        );
    }
    Ok(CartView::build(cart, &details, now))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub meal_id: MealId,
    pub name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: OrderId,
    pub buyer_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    pub chef_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chef_name: Option<String>,
    pub order_items: Vec<OrderItemView>,
    pub delivery_address: DeliveryAddress,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub payment_method: String,
    pub payment_result: Option<PaymentResult>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl OrderView {
    pub fn new(order: &Order) -> Self {
        Self {
            id: order.id,
            buyer_id: order.buyer_id,
            buyer_name: None,
            chef_id: order.chef_id,
            chef_name: None,
            order_items: order
                .items
                .iter()
                .map(|item| OrderItemView {
                    meal_id: item.meal_id,
                    name: item.name.clone(),
                    quantity: item.quantity,
                    price: item.unit_price,
                    image: item.image.clone(),
                })
                .collect(),
            delivery_address: order.delivery_address.clone(),
            total_price: order.total_price,
            status: order.status,
            payment_method: order.payment_method.clone(),
            payment_result: order.payment_result.clone(),
            delivered_at: order.delivered_at,
            created_at: order.created_at,
        }
    }
}

/// Which party names to resolve on an order view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counterpart {
    Buyer,
    Chef,
    Both,
}

impl Counterpart {
    fn buyer(self) -> bool {
        matches!(self, Counterpart::Buyer | Counterpart::Both)
    }

    fn chef(self) -> bool {
        matches!(self, Counterpart::Chef | Counterpart::Both)
    }
}

/// Projects orders, resolving the requested party names once per distinct user.
pub async fn load_order_views(
    orders: &[Order],
    accounts: &AccountClient,
    counterpart: Counterpart,
) -> Result<Vec<OrderView>, ProjectionError> {
    let mut names = NameCache::new(accounts);
    let mut views = Vec::with_capacity(orders.len());
    for order in orders {
        let mut view = OrderView::new(order);
        if counterpart.buyer() {
            view.buyer_name = Some(names.get(order.buyer_id).await?);
        }
        if counterpart.chef() {
            view.chef_name = Some(names.get(order.chef_id).await?);
        }
        views.push(view);
    }
    Ok(views)
}

struct NameCache<'a> {
    accounts: &'a AccountClient,
    known: HashMap<UserId, String>,
}

impl<'a> NameCache<'a> {
    fn new(accounts: &'a AccountClient) -> Self {
        Self {
            accounts,
            known: HashMap::new(),
        }
    }

    async fn get(&mut self, id: UserId) -> Result<String, AccountError> {
        if let Some(name) = self.known.get(&id) {
            return Ok(name.clone());
        }
        let name = self
            .accounts
            .display_name(id)
            .await?
            .unwrap_or_else(|| UNKNOWN_NAME.to_string());
        self.known.insert(id, name.clone());
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CartItem, OrderLineItem, PromoCode};
    use chrono::Duration;
    use serde_json::json;

    fn cart() -> Cart {
        let mut cart = Cart::new(UserId(1));
        cart.items.push(CartItem {
            id: CartItemId(1),
            meal_id: MealId(10),
            quantity: 3,
            unit_price: Decimal::new(10, 0),
            special_instructions: "mild".into(),
        });
        cart
    }

    fn details() -> HashMap<MealId, MealDetails> {
        HashMap::from([(
            MealId(10),
            MealDetails {
                name: "Rajma Chawal".into(),
                chef_name: "Meera".into(),
                image: Some("rajma.jpg".into()),
            },
        )])
    }

    #[test]
    fn cart_view_wire_shape() {
        let now = Utc::now();
        let mut cart = cart();
        cart.promo = Some(PromoCode::new("WELCOME10", 10, now + Duration::days(1)));

        let view = CartView::build(&cart, &details(), now);
        let wire = serde_json::to_value(&view).unwrap();

        assert_eq!(
            wire,
            json!({
                "items": [{
                    "id": 1,
                    "mealId": 10,
                    "name": "Rajma Chawal",
                    "chefName": "Meera",
                    "price": 10.0,
                    "quantity": 3,
                    "image": "rajma.jpg",
                    "specialInstructions": "mild"
                }],
                "totalPrice": 30.0,
                "promoCode": {
                    "code": "WELCOME10",
                    "discount": 10,
                    "discountAmount": 3.0,
                    "finalPrice": 27.0
                }
            })
        );
    }

    #[test]
    fn sub_cent_discount_rounds_to_cents() {
        let now = Utc::now();
        let mut cart = Cart::new(UserId(1));
        cart.items.push(CartItem {
            id: CartItemId(1),
            meal_id: MealId(10),
            quantity: 1,
            unit_price: Decimal::new(5, 2),
            special_instructions: String::new(),
        });
        cart.promo = Some(PromoCode::new("HALF", 50, now + Duration::days(1)));

        let promo = CartView::build(&cart, &details(), now).promo_code.unwrap();
        assert_eq!(promo.discount_amount, Decimal::new(3, 2));
        assert_eq!(promo.final_price, Decimal::new(2, 2));
        assert_eq!(promo.discount_amount + promo.final_price, Decimal::new(5, 2));
    }

    #[test]
    fn expired_promo_is_not_projected() {
        let now = Utc::now();
        let mut cart = cart();
        cart.promo = Some(PromoCode::new("OLD", 10, now - Duration::seconds(1)));

        let view = CartView::build(&cart, &details(), now);
        assert!(view.promo_code.is_none());
        assert_eq!(view.total_price, Decimal::new(30, 0));
    }

    #[test]
    fn missing_meal_details_fall_back() {
        let view = CartView::build(&cart(), &HashMap::new(), Utc::now());
        assert_eq!(view.items[0].name, "Unavailable meal");
        assert_eq!(view.items[0].price, Decimal::new(10, 0));
    }

    #[test]
    fn order_view_uses_camel_case_and_snake_case_status() {
        let order = Order {
            id: OrderId(5),
            buyer_id: UserId(1),
            chef_id: UserId(2),
            items: vec![OrderLineItem {
                meal_id: MealId(10),
                name: "Rajma Chawal".into(),
                quantity: 2,
                unit_price: Decimal::new(1050, 2),
                image: None,
            }],
            delivery_address: DeliveryAddress {
                street: "1 Main St".into(),
                city: "Austin".into(),
                state: "TX".into(),
                zip: "73301".into(),
            },
            total_price: Decimal::new(21, 0),
            status: OrderStatus::OutForDelivery,
            payment_method: "card".into(),
            payment_result: None,
            delivered_at: None,
            created_at: Utc::now(),
        };

        let wire = serde_json::to_value(OrderView::new(&order)).unwrap();
        assert_eq!(wire["status"], "out_for_delivery");
        assert_eq!(wire["orderItems"][0]["price"], 10.5);
        assert_eq!(wire["deliveryAddress"]["zip"], "73301");
        assert!(wire.get("buyerName").is_none());
        assert!(wire["deliveredAt"].is_null());
    }
}
