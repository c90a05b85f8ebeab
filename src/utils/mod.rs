pub mod legacy_bool;
