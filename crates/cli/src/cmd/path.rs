use std::path::Path;

use tracing::error;

use crate::PathArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &PathArgs) {
    let rc = super::load(config, profile);
    let matcher = rc.matcher();

    let point = match args.date.as_deref() {
        None => matcher.calendar().now(),
        Some(raw) => match super::parse_point(raw, matcher.calendar()) {
            Some(point) => point,
            None => {
                error!("Unrecognised date: {raw}");
                std::process::exit(1);
            }
        },
    };

    let path = matcher.note_path(point, args.granularity);
    if args.absolute {
        println!("{}", rc.vault_root.join(path).display());
    } else {
        println!("{}", path.display());
    }
}
