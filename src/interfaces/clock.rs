/// Source of "now", in seconds. Need not be monotonic.
pub trait Clock: Send + Sync {
    fn now(&self) -> f64;
}
