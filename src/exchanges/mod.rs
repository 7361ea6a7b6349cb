pub mod okex;
