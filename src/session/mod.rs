/// The overlay controller that owns all simulation state.
pub mod overlay;
