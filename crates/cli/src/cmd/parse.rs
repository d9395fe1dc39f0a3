use std::path::Path;

use crate::ParseArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &ParseArgs) {
    let rc = super::load(config, profile);
    let matcher = rc.matcher();

    match matcher.date_from_path(Path::new(&args.name), args.granularity) {
        Some(date) => {
            println!("date: {}", date.to_rfc3339());
            println!("uid: {}", matcher.date_uid(date, args.granularity));
        }
        None => {
            println!(
                "no match: '{}' is not a {} note name (format {})",
                args.name,
                args.granularity,
                matcher.format(args.granularity)
            );
            std::process::exit(1);
        }
    }
}
