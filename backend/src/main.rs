#![deny(clippy::all)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::todo)]
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]

#[tokio::main]
async fn main() {
    app::run().await;
}


pub mod cfg {
    mod app_settings;
    mod generator_settings;
    mod jwt_settings;
    mod server_settings;

    pub use app_settings::*;
    pub use generator_settings::*;
    pub use jwt_settings::*;
    pub use server_settings::*;
}

pub mod core {
    mod context;

    pub use context::*;
}

pub mod auth {
    mod jwt;

    pub use jwt::*;
}

pub mod services {
    pub mod texts;
}

pub mod routes {
    pub mod ai;
    pub mod assets;
    pub mod health;
}

pub mod app {
    mod router;
    mod server;

    pub use router::*;
    pub use server::*;
}
