mod cli;

use actix_web::{App, HttpServer};
use clap::Parser;
use tracing::info;
use vecsearch::config::{self, Config, Mode};
use vecsearch::{server, VectorStore};

#[actix_web::main]
async fn main() -> Result<(), vecsearch::VecError> {
    let cfg = Config::parse();
    config::init_logging(&cfg.log);

    match cfg.mode() {
        Mode::Repl => {
            let mut store = VectorStore::new();
            let stdin = std::io::stdin();
            cli::run_repl(&mut store, cfg.top_k, stdin.lock(), std::io::stdout())?;
        }
        Mode::Demo => {
            cli::run_demo(&mut std::io::stdout())?;
        }
        Mode::Serve { bind } => {
            let state = server::app_state(VectorStore::new());
            info!(%bind, "starting server");
            HttpServer::new(move || App::new().app_data(state.clone()).configure(server::config))
                .bind(bind.as_str())?
                .run()
                .await?;
        }
    }

    Ok(())
}
