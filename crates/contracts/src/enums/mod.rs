pub mod formula_priority;

pub use formula_priority::FormulaPriority;
