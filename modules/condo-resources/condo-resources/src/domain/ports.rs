/// Output port for domain events. Publishing never fails the mutation.
pub trait EventPublisher<E>: Send + Sync + 'static {
    fn publish(&self, event: &E);
}
