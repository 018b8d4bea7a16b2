pub mod a001_doctor;
pub mod a002_patient;
pub mod a003_formula;
pub mod common;
