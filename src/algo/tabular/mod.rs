pub mod td_zero;
