/// Host-independent key identifiers.
///
/// Frontends translate their native key codes into this enum before
/// handing events to an `App`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    C,
    D,
    S,
    W,
    X,
    Z,
    Return,
    Space,
    Escape,
}
