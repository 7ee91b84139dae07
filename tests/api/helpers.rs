use once_cell::sync::Lazy;
use reqwest::Response;
use tempfile::TempDir;

use lead_intake::{
    config::{get_configuration, Settings},
    domain::LeadRow,
    spreadsheet::Spreadsheet,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

// The subscriber can only be installed once, whatever the number of tests
static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(String::from("test"), String::from("debug"));
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub config: Settings,
    pub address: String,
    pub spreadsheet_dir: TempDir,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        Lazy::force(&TRACING);

        let mut config = get_configuration().expect("Missing configuration file.");
        let spreadsheet_dir = tempfile::tempdir().expect("Failed to create a spreadsheet directory.");

        // We are using port 0 as way to define a different port per each test. Port 0 is a special case that operating systems
        // take into account: when port is 0, the OS will search for the first available port
        config.set_app_port(0);
        config.set_spreadsheet_directory(spreadsheet_dir.path().to_path_buf());

        let application = Application::build(config.clone())
            .await
            .expect("Failed to build application.");

        let address = format!("http://127.0.0.1:{}", application.get_port());

        tokio::spawn(application.run_until_stop());

        TestApp {
            address,
            config,
            spreadsheet_dir,
        }
    }

    pub fn leads_url(&self) -> String {
        format!("{}/leads", self.address)
    }

    pub async fn post_lead(&self, body: serde_json::Value) -> Response {
        reqwest::Client::new()
            .post(&self.leads_url())
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_raw_lead(&self, body: &'static str) -> Response {
        reqwest::Client::new()
            .post(&self.leads_url())
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub fn worksheet_path(&self) -> std::path::PathBuf {
        self.spreadsheet_dir
            .path()
            .join(format!("{}.csv", self.config.spreadsheet.worksheet))
    }

    pub fn saved_rows(&self) -> Vec<LeadRow> {
        Spreadsheet::open(self.spreadsheet_dir.path())
            .expect("Failed to open the spreadsheet.")
            .read_rows(&self.config.spreadsheet.worksheet)
            .expect("Failed to read the worksheet.")
    }
}
