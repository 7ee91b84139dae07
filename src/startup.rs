use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use std::io::{Error, ErrorKind};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use crate::config::Settings;
use crate::routes::{append_lead, health_check, LeadWorksheet};
use crate::spreadsheet::Spreadsheet;

pub struct Application {
    pub port: u16,
    pub server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, std::io::Error> {
        let spreadsheet = Spreadsheet::open(config.spreadsheet.directory.clone())
            .map_err(|err| Error::new(ErrorKind::Other, err))?;
        let worksheet = LeadWorksheet {
            name: config.spreadsheet.worksheet.clone(),
            timezone: config
                .spreadsheet
                .get_timezone()
                .map_err(|err| Error::new(ErrorKind::InvalidInput, err))?,
        };

        let listener = TcpListener::bind(config.get_address())?;
        let port = listener.local_addr()?.port();
        let server = run(listener, spreadsheet, worksheet)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    spreadsheet: Spreadsheet,
    worksheet: LeadWorksheet,
) -> Result<Server, std::io::Error> {
    let spreadsheet = web::Data::new(spreadsheet);
    let worksheet = web::Data::new(worksheet);

    let server = HttpServer::new(move || {
        // App is where your application logic lives: routing, middlewares, request handler, etc
        App::new()
            // 'wrap' method adds a middleware to the App. This specific middleware provide incoming
            // request logger
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/leads", web::get().to(health_check))
            .route("/leads", web::post().to(append_lead))
            .app_data(spreadsheet.clone())
            .app_data(worksheet.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
