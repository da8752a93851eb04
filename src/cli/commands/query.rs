//! The `query` command: print the request URL for a METAR query.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::cli::args::QueryArgs;
use crate::query::MetarQuery;

/// Run the query command
pub fn run_query(args: &QueryArgs) -> Result<()> {
    println!("{}", build_url(args, Utc::now())?);
    Ok(())
}

/// Build the request URL for `args`, resolving relative windows against `now`
pub fn build_url(args: &QueryArgs, now: DateTime<Utc>) -> Result<String> {
    let mut query = MetarQuery::latest(args.stations.iter().cloned()).most_recent(!args.all);
    if let Some(starting) = args.starting(now)? {
        query = query.starting(starting);
    }
    if let Some(ending) = args.ending()? {
        query = query.ending(ending);
    }
    Ok(query.to_url(&args.endpoint, now)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{Args, Commands};
    use chrono::TimeZone;
    use clap::Parser;

    fn query_args(argv: &[&str]) -> QueryArgs {
        let mut full = vec!["metar-normalizer", "query"];
        full.extend_from_slice(argv);
        match Args::parse_from(full).command {
            Some(Commands::Query(args)) => args,
            other => panic!("expected query command, got {:?}", other),
        }
    }

    #[test]
    fn test_url_for_recent_window() {
        let now = Utc.with_ymd_and_hms(2019, 6, 1, 12, 0, 0).unwrap();
        let args = query_args(&[
            "-s",
            "KDEN",
            "--hours",
            "1.5",
            "--endpoint",
            "https://example.test/api",
        ]);
        assert_eq!(
            build_url(&args, now).unwrap(),
            "https://example.test/api?requestType=retrieve&format=xml&dataSource=metars\
             &stationString=KDEN&hoursBeforeNow=1.5&mostRecentForEachStation=constraint"
        );
    }

    #[test]
    fn test_all_reports_disables_most_recent() {
        let now = Utc.with_ymd_and_hms(2019, 6, 1, 12, 0, 0).unwrap();
        let args = query_args(&["-s", "KDEN", "--all"]);
        assert!(
            build_url(&args, now)
                .unwrap()
                .ends_with("mostRecentForEachStation=false")
        );
    }

    #[test]
    fn test_reversed_window_rejected() {
        let now = Utc.with_ymd_and_hms(2019, 6, 1, 12, 0, 0).unwrap();
        let args = query_args(&[
            "-s",
            "KDEN",
            "--start",
            "2019-06-01T10:00:00Z",
            "--end",
            "2019-06-01T09:00:00Z",
        ]);
        assert!(build_url(&args, now).is_err());
    }
}
