mod propeller_library;

pub use propeller_library::{PropellerData, PROPELLER_LIBRARY};
