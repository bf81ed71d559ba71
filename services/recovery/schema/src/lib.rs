pub mod reset_codes;
