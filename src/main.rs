use std::net::SocketAddr;

use actix_web::{App, HttpServer, middleware, web};
use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use zipserve::{
    ZipserveConfig,
    args::CliArgs,
    errors::StartupError,
    routes,
};

#[actix_web::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        simplelog::ConfigBuilder::new()
            .set_time_format_rfc2822()
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let config = ZipserveConfig::try_from_args(args)?;

    let socket_addresses: Vec<SocketAddr> = config
        .interfaces
        .iter()
        .map(|&interface| SocketAddr::new(interface, config.port))
        .collect();

    log::info!("serving path {}", config.path.display());

    let app_config = config.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_config.clone()))
            .wrap(middleware::Logger::default())
            .configure(routes::configure_app)
    })
    .bind(socket_addresses.as_slice())
    .map_err(|e| StartupError::IoError("Failed to bind server".to_string(), e))?
    .run();

    log::info!("server started on {}", config.port);

    server.await?;

    Ok(())
}
