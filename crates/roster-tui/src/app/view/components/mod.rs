pub mod detail;
pub mod grid;
pub mod header;
pub mod not_found;
pub mod sidebar;
pub mod status;
pub mod table;
