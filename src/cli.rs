use clap::{value_parser, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    let page = Arg::new("page")
        .long("page")
        .num_args(1)
        .default_value("1")
        .value_parser(value_parser!(u32))
        .help("Result page (1-based)");

    let movies = Command::new("movies")
        .about("The Movie Database (needs TMDB_API_KEY)")
        .subcommand_required(true)
        .subcommand(
            Command::new("discover")
                .about("Discover popular movies")
                .arg(page.clone()),
        )
        .subcommand(
            Command::new("search")
                .about("Search movies by title")
                .arg(Arg::new("query").required(true))
                .arg(page),
        )
        .subcommand(
            Command::new("get").about("Get a single movie").arg(
                Arg::new("id")
                    .required(true)
                    .value_parser(value_parser!(u64)),
            ),
        )
        .subcommand(
            Command::new("videos").about("List a movie's videos").arg(
                Arg::new("id")
                    .required(true)
                    .value_parser(value_parser!(u64)),
            ),
        );

    let restaurants = Command::new("restaurants")
        .about("Yelp restaurants (needs YELP_API_TOKEN)")
        .subcommand_required(true)
        .subcommand(
            Command::new("search")
                .about("Search restaurants")
                .arg(
                    Arg::new("lat")
                        .long("lat")
                        .num_args(1)
                        .requires("long")
                        .allow_hyphen_values(true)
                        .value_parser(value_parser!(f64)),
                )
                .arg(
                    Arg::new("long")
                        .long("long")
                        .num_args(1)
                        .requires("lat")
                        .allow_hyphen_values(true)
                        .value_parser(value_parser!(f64)),
                )
                .arg(
                    Arg::new("radius")
                        .long("radius")
                        .num_args(1)
                        .default_value("1000")
                        .value_parser(value_parser!(u32))
                        .help("Radius in meters"),
                )
                .arg(
                    Arg::new("offset")
                        .long("offset")
                        .num_args(1)
                        .default_value("0")
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .num_args(1)
                        .default_value("20")
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    Arg::new("price")
                        .long("price")
                        .num_args(1)
                        .help("Comma separated budget levels, e.g. 1,2"),
                )
                .arg(
                    Arg::new("open-now")
                        .long("open-now")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("get")
                .about("Get a single restaurant")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("reviews")
                .about("List a restaurant's reviews")
                .arg(Arg::new("id").required(true)),
        );

    Command::new("apikit")
        .about("Demo client for the bundled API integrations")
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .num_args(1)
                .global(true)
                .help("Override RUST_LOG level (e.g., info, debug)"),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .help("Print version and exit")
                .action(ArgAction::SetTrue),
        )
        .subcommand(movies)
        .subcommand(restaurants)
}

pub fn init_logging(level: Option<&str>) {
    // Explicit level wins, then RUST_LOG, then info.
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(lvl) = level {
        builder.parse_filters(lvl);
    }
    builder.init();
}
