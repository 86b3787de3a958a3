// src/crawl/task.rs
// =============================================================================
// A claimed URL that a worker is currently processing.
//
// The frontier needs exactly one complete() per claimed URL, whichever way
// processing ends: success, fetch error, or cancellation halfway through.
// Tying complete() to Drop makes every exit path, including early `break`s
// and panics, signal it.
// =============================================================================

use url::Url;

use super::queue::Frontier;

pub struct CrawlTask<'a> {
    frontier: &'a Frontier,
    url: Url,
}

impl<'a> CrawlTask<'a> {
    pub fn claim(frontier: &'a Frontier, url: Url) -> Self {
        Self { frontier, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Drop for CrawlTask<'_> {
    fn drop(&mut self) {
        self.frontier.complete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_drop_completes_claimed_url() {
        let frontier = Frontier::new();
        frontier.add(Url::parse("https://test/a").unwrap());

        let url = frontier.next().await.unwrap();
        let task = CrawlTask::claim(&frontier, url);
        assert_eq!(task.url().as_str(), "https://test/a");
        assert_eq!(frontier.outstanding(), 1);

        drop(task);
        assert_eq!(frontier.outstanding(), 0);
    }

    async fn process_failing(frontier: &Frontier) -> Result<(), String> {
        let url = frontier.next().await.ok_or("closed")?;
        let task = CrawlTask::claim(frontier, url);
        if task.url().path() == "/a" {
            return Err(format!("could not get url {}", task.url()));
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_early_return_still_completes() {
        let frontier = Frontier::new();
        frontier.add(Url::parse("https://test/a").unwrap());

        assert!(process_failing(&frontier).await.is_err());
        assert_eq!(frontier.outstanding(), 0);
    }
}
