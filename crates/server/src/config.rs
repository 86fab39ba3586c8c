use clap::Parser;
use std::path::PathBuf;

/// Server configuration, read from flags or the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "cinecase-server")]
#[command(about = "HTTP service for genre/rating/duration/year movie recommendations", long_about = None)]
pub struct ServerConfig {
    /// Cleaned movie dataset (CSV)
    #[arg(long, env = "CINECASE_DATA_PATH", default_value = "data/processed_movies.csv")]
    pub data_path: PathBuf,

    /// JSON file where feedback is stored
    #[arg(long, env = "CINECASE_FEEDBACK_PATH", default_value = "data/movie_feedback.json")]
    pub feedback_path: PathBuf,

    /// Address to bind
    #[arg(long, env = "CINECASE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "CINECASE_PORT", default_value_t = 3000)]
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::parse_from(["cinecase-server"]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.data_path, PathBuf::from("data/processed_movies.csv"));
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = ServerConfig::parse_from([
            "cinecase-server",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--feedback-path",
            "/tmp/feedback.json",
        ]);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.feedback_path, PathBuf::from("/tmp/feedback.json"));
    }
}
