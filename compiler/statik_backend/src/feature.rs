/// A capability a backend may or may not support, probed through
/// [`crate::Backend::supports_feature`] rather than encoded as a bitflag set
/// on the trait object, so adding a capability never breaks an existing
/// `impl Backend`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Feature {
    Functions,
    Variables,
    Arithmetic,
    ControlFlow,
    Loops,
    Classes,
    Containers,
}
