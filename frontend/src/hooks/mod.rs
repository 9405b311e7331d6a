pub mod use_application_lookup;
