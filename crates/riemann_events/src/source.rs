use crate::scalar::Scalar;

/// Accessor capability set of an upstream event.
///
/// Every accessor may answer with a string, a symbol, a number, a boolean or
/// [`Scalar::Null`]. A panicking accessor is a bug in the producer and is not
/// caught by the normalizer.
pub trait SourceEvent {
    fn host(&self) -> Scalar;
    fn service(&self) -> Scalar;
    fn state(&self) -> Scalar;
    fn description(&self) -> Scalar;
    fn time(&self) -> Scalar;
    fn ttl(&self) -> Scalar;
    fn tags(&self) -> Vec<Scalar>;
    /// Attribute pairs in iteration order.
    fn attributes(&self) -> Vec<(Scalar, Scalar)>;
    fn key(&self) -> Scalar;
    fn value(&self) -> Scalar;
}
