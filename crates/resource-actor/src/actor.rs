//! # Generic Actor Server
//!
//! `ResourceActor` owns the store for one entity type and processes requests
//! sequentially on its own Tokio task.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest, Response};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Idle-record eviction settings.
///
/// A record that has not been read or written for `ttl` is dropped on the next sweep.
/// Sweeps run every `sweep_every`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retention {
    pub ttl: Duration,
    pub sweep_every: Duration,
}

impl Retention {
    pub fn new(ttl: Duration, sweep_every: Duration) -> Self {
        Self { ttl, sweep_every }
    }
}

struct Stored<T> {
    entity: T,
    touched: Instant,
}

impl<T> Stored<T> {
    fn new(entity: T) -> Self {
        Self {
            entity,
            touched: Instant::now(),
        }
    }

    fn touch(&mut self) {
        self.touched = Instant::now();
    }
}

/// The actor that owns every record of type `T`.
///
/// Create it with [`ResourceActor::new`] (or [`ResourceActor::with_retention`]), hand the
/// returned client to callers, then spawn [`ResourceActor::run`] with the entity's context.
///
/// # Operations
///
/// * **Create** - allocates the next free `u32` id, builds the entity, stores it.
/// * **Ensure** - returns the stored entity for the given id, building it first if absent.
/// * **Get** / **List** - clone out matching entities.
/// * **Update** / **Action** - run the hook on a clone; commit the clone only on success.
/// * **Delete** - runs `on_delete`, then removes the entity.
///
/// Every request that reaches an entity refreshes its retention clock.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, Stored<T>>,
    next_id: u32,
    retention: Option<Retention>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates an actor and its client.
    ///
    /// `buffer_size` is the request channel capacity; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
            retention: None,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Creates an actor whose idle records are evicted according to `retention`.
    pub fn with_retention(buffer_size: usize, retention: Retention) -> (Self, ResourceClient<T>) {
        let (mut actor, client) = Self::new(buffer_size);
        actor.retention = Some(retention);
        (actor, client)
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, retention = ?self.retention, "Actor started");

        let mut sweep = self.retention.map(|r| {
            let mut interval = tokio::time::interval(r.sweep_every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });

        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(msg) => self.dispatch(msg, &context, entity_type).await,
                    None => break,
                },
                _ = next_sweep(&mut sweep) => self.evict_idle(entity_type),
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn dispatch(&mut self, msg: ResourceRequest<T>, ctx: &T::Context, entity_type: &str) {
        match msg {
            ResourceRequest::Create { params, respond_to } => {
                debug!(entity_type, ?params, "Create");
                let id = self.allocate_id();
                match T::from_create_params(id.clone(), params, ctx).await {
                    Ok(item) => {
                        self.store.insert(id.clone(), Stored::new(item));
                        info!(entity_type, %id, size = self.store.len(), "Created");
                        let _ = respond_to.send(Ok(id));
                    }
                    Err(e) => {
                        warn!(entity_type, error = %e, "Create failed");
                        let _ = respond_to.send(Err(FrameworkError::Entity(e)));
                    }
                }
            }
            ResourceRequest::Ensure {
                id,
                params,
                respond_to,
            } => {
                if let Some(slot) = self.store.get_mut(&id) {
                    slot.touch();
                    debug!(entity_type, %id, "Ensure hit");
                    let _ = respond_to.send(Ok(slot.entity.clone()));
                    return;
                }
                debug!(entity_type, %id, ?params, "Ensure miss");
                match T::from_create_params(id.clone(), params, ctx).await {
                    Ok(item) => {
                        let snapshot = item.clone();
                        self.store.insert(id.clone(), Stored::new(item));
                        info!(entity_type, %id, size = self.store.len(), "Created");
                        let _ = respond_to.send(Ok(snapshot));
                    }
                    Err(e) => {
                        warn!(entity_type, %id, error = %e, "Create failed");
                        let _ = respond_to.send(Err(FrameworkError::Entity(e)));
                    }
                }
            }
            ResourceRequest::Get { id, respond_to } => {
                let item = self.store.get_mut(&id).map(|slot| {
                    slot.touch();
                    slot.entity.clone()
                });
                debug!(entity_type, %id, found = item.is_some(), "Get");
                let _ = respond_to.send(Ok(item));
            }
            ResourceRequest::List { filter, respond_to } => {
                let items = self.list(&filter);
                debug!(entity_type, matched = items.len(), "List");
                let _ = respond_to.send(Ok(items));
            }
            ResourceRequest::Update {
                id,
                update,
                respond_to,
            } => {
                debug!(entity_type, %id, ?update, "Update");
                let Some(slot) = self.store.get_mut(&id) else {
                    not_found::<_, T>(respond_to, entity_type, &id);
                    return;
                };
                slot.touch();
                let mut draft = slot.entity.clone();
                match draft.on_update(update, ctx).await {
                    Ok(()) => {
                        slot.entity = draft.clone();
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(draft));
                    }
                    Err(e) => {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::Entity(e)));
                    }
                }
            }
            ResourceRequest::Delete { id, respond_to } => {
                debug!(entity_type, %id, "Delete");
                let Some(slot) = self.store.get(&id) else {
                    not_found::<_, T>(respond_to, entity_type, &id);
                    return;
                };
                if let Err(e) = slot.entity.on_delete(ctx).await {
                    warn!(entity_type, %id, error = %e, "on_delete failed");
                    let _ = respond_to.send(Err(FrameworkError::Entity(e)));
                    return;
                }
                self.store.remove(&id);
                info!(entity_type, %id, size = self.store.len(), "Deleted");
                let _ = respond_to.send(Ok(()));
            }
            ResourceRequest::Action {
                id,
                action,
                respond_to,
            } => {
                debug!(entity_type, %id, ?action, "Action");
                let Some(slot) = self.store.get_mut(&id) else {
                    not_found::<_, T>(respond_to, entity_type, &id);
                    return;
                };
                slot.touch();
                let mut draft = slot.entity.clone();
                match draft.handle_action(action, ctx).await {
                    Ok(result) => {
                        slot.entity = draft;
                        info!(entity_type, %id, "Action ok");
                        let _ = respond_to.send(Ok(result));
                    }
                    Err(e) => {
                        warn!(entity_type, %id, error = %e, "Action failed");
                        let _ = respond_to.send(Err(FrameworkError::Entity(e)));
                    }
                }
            }
        }
    }

    /// Next id not already taken by an `Ensure`d record.
    fn allocate_id(&mut self) -> T::Id {
        loop {
            let id = T::Id::from(self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            if !self.store.contains_key(&id) {
                return id;
            }
        }
    }

    fn list(&mut self, filter: &Filter<T>) -> Vec<T> {
        self.store
            .values_mut()
            .filter(|slot| filter.matches(&slot.entity))
            .map(|slot| {
                slot.touch();
                slot.entity.clone()
            })
            .collect()
    }

    fn evict_idle(&mut self, entity_type: &str) {
        let Some(retention) = self.retention else {
            return;
        };
        let before = self.store.len();
        self.store
            .retain(|_, slot| slot.touched.elapsed() < retention.ttl);
        let evicted = before - self.store.len();
        if evicted > 0 {
            info!(entity_type, evicted, size = self.store.len(), "Evicted idle records");
        }
    }
}

fn not_found<R, T: ActorEntity>(respond_to: Response<R, T::Error>, entity_type: &str, id: &T::Id) {
    warn!(entity_type, %id, "Not found");
    let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
}

async fn next_sweep(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Tally {
        id: u32,
        entries: Vec<u32>,
    }

    #[derive(Debug)]
    struct TallyCreate;

    #[derive(Debug)]
    enum TallyAction {
        /// Pushes every value, failing on the first zero.
        PushAll(Vec<u32>),
    }

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("zero is not allowed")]
    struct ZeroError;

    #[async_trait]
    impl ActorEntity for Tally {
        type Id = u32;
        type Create = TallyCreate;
        type Update = Vec<u32>;
        type Action = TallyAction;
        type ActionResult = usize;
        type Context = ();
        type Error = ZeroError;

        async fn from_create_params(id: u32, _: TallyCreate, _: &()) -> Result<Self, ZeroError> {
            Ok(Self {
                id,
                entries: Vec::new(),
            })
        }

        async fn on_update(&mut self, update: Vec<u32>, _: &()) -> Result<(), ZeroError> {
            self.entries = update;
            if self.entries.contains(&0) {
                return Err(ZeroError);
            }
            Ok(())
        }

        async fn handle_action(&mut self, action: TallyAction, _: &()) -> Result<usize, ZeroError> {
            match action {
                TallyAction::PushAll(values) => {
                    for value in values {
                        if value == 0 {
                            return Err(ZeroError);
                        }
                        self.entries.push(value);
                    }
                    Ok(self.entries.len())
                }
            }
        }
    }

    #[tokio::test]
    async fn failed_action_leaves_record_untouched() {
        let (actor, client) = ResourceActor::<Tally>::new(8);
        tokio::spawn(actor.run(()));

        let id = client.create(TallyCreate).await.unwrap();
        assert_eq!(
            client
                .perform_action(id, TallyAction::PushAll(vec![1, 2]))
                .await
                .unwrap(),
            2
        );

        let result = client
            .perform_action(id, TallyAction::PushAll(vec![3, 0, 4]))
            .await;
        assert!(matches!(result, Err(FrameworkError::Entity(ZeroError))));

        let tally = client.get(id).await.unwrap().unwrap();
        assert_eq!(tally.entries, vec![1, 2]);
    }

    #[tokio::test]
    async fn failed_update_leaves_record_untouched() {
        let (actor, client) = ResourceActor::<Tally>::new(8);
        tokio::spawn(actor.run(()));

        let id = client.create(TallyCreate).await.unwrap();
        client.update(id, vec![5]).await.unwrap();
        assert!(client.update(id, vec![7, 0]).await.is_err());

        assert_eq!(client.get(id).await.unwrap().unwrap().entries, vec![5]);
    }

    #[tokio::test]
    async fn ensure_creates_once_and_create_skips_taken_ids() {
        let (actor, client) = ResourceActor::<Tally>::new(8);
        tokio::spawn(actor.run(()));

        let first = client.ensure(1, TallyCreate).await.unwrap();
        client
            .perform_action(1, TallyAction::PushAll(vec![9]))
            .await
            .unwrap();
        let again = client.ensure(1, TallyCreate).await.unwrap();
        assert!(first.entries.is_empty());
        assert_eq!(again.entries, vec![9]);

        let allocated = client.create(TallyCreate).await.unwrap();
        assert_eq!(allocated, 2);
    }

    #[tokio::test]
    async fn list_applies_filter() {
        let (actor, client) = ResourceActor::<Tally>::new(8);
        tokio::spawn(actor.run(()));

        for _ in 0..3 {
            client.create(TallyCreate).await.unwrap();
        }
        let odd = client.list(Filter::new(|t: &Tally| t.id % 2 == 1)).await.unwrap();
        let mut ids: Vec<u32> = odd.into_iter().map(|t| t.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let (actor, client) = ResourceActor::<Tally>::new(8);
        tokio::spawn(actor.run(()));

        let result = client.perform_action(42, TallyAction::PushAll(vec![1])).await;
        assert!(matches!(result, Err(FrameworkError::NotFound(id)) if id == "42"));
        assert!(client.delete(42).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn idle_records_are_evicted() {
        let retention = Retention::new(Duration::from_secs(60), Duration::from_secs(10));
        let (actor, client) = ResourceActor::<Tally>::with_retention(8, retention);
        tokio::spawn(actor.run(()));

        let stale = client.create(TallyCreate).await.unwrap();
        let fresh = client.create(TallyCreate).await.unwrap();

        tokio::time::sleep(Duration::from_secs(40)).await;
        client.get(fresh).await.unwrap();
        tokio::time::sleep(Duration::from_secs(35)).await;

        assert!(client.get(stale).await.unwrap().is_none());
        assert!(client.get(fresh).await.unwrap().is_some());
    }
}
