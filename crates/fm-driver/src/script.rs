use fm_core::{Catalog, job};
use fm_model::Job;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Open a job script, `-` meaning stdin.
pub async fn open(path: &str) -> std::io::Result<Box<dyn AsyncBufRead + Unpin + Send>> {
    if path == "-" {
        return Ok(Box::new(BufReader::new(tokio::io::stdin())));
    }
    let file = tokio::fs::File::open(path).await?;
    Ok(Box::new(BufReader::new(file)))
}

/// Parse each line into a job and hand it to `sink` as soon as it is read.
///
/// Returns the number of lines read.
pub async fn for_each_job<R, F>(reader: R, catalog: &Catalog, mut sink: F) -> anyhow::Result<usize>
where
    R: AsyncBufRead + Unpin,
    F: FnMut(Job) -> anyhow::Result<()>,
{
    let mut lines = reader.lines();
    let mut count = 0;
    while let Some(line) = lines.next_line().await? {
        count += 1;
        sink(job::parse_line(&line, catalog))?;
    }
    Ok(count)
}
