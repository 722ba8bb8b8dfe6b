//! Pure puzzle state. Scenes own one of these and translate pointer input
//! into the operations below.

pub mod quiz;
pub mod rotation;
pub mod sequence;
pub mod slots;
