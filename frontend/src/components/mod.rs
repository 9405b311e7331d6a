pub mod approval_flow;
pub mod basic_info_form;
pub mod city_picker;
pub mod expense_tables;
pub mod filterable_header;
pub mod header;
pub mod project_picker;
pub mod settlement_panel;
pub mod summary_cards;
pub mod traveler_roster;
pub mod trip_list;
