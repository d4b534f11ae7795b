pub(crate) mod clock;
pub(crate) mod lights;
pub(crate) mod pendulum;
pub(crate) mod spin;
