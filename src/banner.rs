// src/banner.rs

/// Prints the application startup banner to the console.
pub fn print_banner() {
    let banner = r#"
 _                     _                               _
| |__   ___  __ _ _ __| |_ __ _ _   _  __ _ _ __ __| |
| '_ \ / _ \/ _` | '__| __/ _` | | | |/ _` | '__/ _` |
| | | |  __/ (_| | |  | || (_| | |_| | (_| | | | (_| |
|_| |_|\___|\__,_|_|   \__\__, |\__,_|\__,_|_|  \__,_|
                          |___/

    Heuristic Cardiovascular Risk Scoring
"#;
    println!("{}", banner);
}
