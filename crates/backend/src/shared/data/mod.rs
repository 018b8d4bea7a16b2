pub mod db;
#[cfg(test)]
pub mod store;
