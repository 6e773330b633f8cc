pub mod cleaning;
pub mod enrich;
pub mod lookup;
pub mod table;
