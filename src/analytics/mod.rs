pub mod risk_return;
