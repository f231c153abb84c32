pub mod u501_return_autofill;
