pub mod energy;
pub mod run;
