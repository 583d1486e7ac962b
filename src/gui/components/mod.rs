// src/gui/components/mod.rs
pub mod control_panel;
pub mod data_table;
pub mod tabs;
