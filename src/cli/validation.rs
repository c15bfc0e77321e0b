use crate::cli::args::CliArgs;
use crate::render::OutputFormat;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(size) = args.page_size {
        if size == 0 {
            return Err("invalid page-size, expected positive integer".to_string());
        }
    }
    if let Some(page) = args.page {
        if page == 0 {
            return Err("invalid page, pages start at 1".to_string());
        }
    }
    if let Some(raw) = args.format.as_deref() {
        if OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --format '{raw}', expected text, json or html"
            ));
        }
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive number of seconds".to_string());
        }
    }
    if let Some(source) = args.source.as_deref() {
        if source.trim().is_empty() {
            return Err("catalog source is empty".to_string());
        }
    }
    if args.interactive && args.info.is_some() {
        return Err("use either --info or --interactive, not both".to_string());
    }
    Ok(())
}
