pub mod core {
    pub mod selector;
    pub mod value;
}

pub mod filter {
    pub mod error;
    pub mod expr;
    pub mod operator;
    pub mod request;
}

pub mod query {
    pub mod options;
}

pub mod schema {
    pub mod field;
    pub mod registry;
}
