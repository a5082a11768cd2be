pub mod medicaid;
