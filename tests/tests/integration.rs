#[allow(unused)]
use utils::*;

#[cfg(feature = "integration")]
mod tests {
    use super::*;

    use anyhow::Result;
    use std::time::Duration;
    use url::Url;
    use volley::prelude::*;

    #[tokio::test]
    async fn http_round_trips_against_the_mock() -> Result<()> {
        init().await;

        let url: Url = "http://0.0.0.0:3002/say".parse()?;
        let config = RunConfig::new(10, 200)?;
        let report = Runner::new(config, HttpRemoteCall::new(url))
            .run(&schema())
            .await?;

        assert_eq!(report.received, 200);
        assert_eq!(report.succeeded, 200);
        Ok(())
    }

    #[tokio::test]
    async fn delayed_endpoint_shows_up_in_the_distribution() -> Result<()> {
        init().await;

        let url: Url = "http://0.0.0.0:3002/say/delay/ms/20".parse()?;
        let config = RunConfig::new(4, 40)?;
        let report = Runner::new(config, HttpRemoteCall::new(url))
            .run(&schema())
            .await?;

        assert_eq!(report.succeeded, 40);
        assert!(report.latency.min >= Duration::from_millis(20));
        Ok(())
    }

    #[tokio::test]
    async fn flaky_endpoint_still_completes_the_batch() -> Result<()> {
        init().await;

        let url: Url = "http://0.0.0.0:3002/say/fail/50".parse()?;
        let config = RunConfig::new(10, 200)?;
        let report = Runner::new(config, HttpRemoteCall::new(url))
            .run(&schema())
            .await?;

        assert_eq!(report.received, 200);
        assert!(report.succeeded < report.received);
        assert!(report.tps() > 0.0);
        Ok(())
    }
}
