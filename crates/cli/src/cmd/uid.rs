use std::path::Path;

use tracing::error;

use crate::UidArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &UidArgs) {
    let rc = super::load(config, profile);
    let matcher = rc.matcher();

    let Some(point) = super::parse_point(&args.timestamp, matcher.calendar()) else {
        error!("Unrecognised timestamp: {}", args.timestamp);
        std::process::exit(1);
    };

    println!("{}", matcher.date_uid(point, args.granularity));
}
