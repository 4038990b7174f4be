mod slot;

pub use slot::{Epoch, Slot};
