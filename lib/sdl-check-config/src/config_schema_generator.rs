use schemars::schema_for;
use sdl_check_config::SdlCheckConfig;

fn main() {
    let schema = schema_for!(SdlCheckConfig);

    match serde_json::to_string_pretty(&schema) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            eprintln!("Failed to serialize the configuration schema: {}", err);
            std::process::exit(1);
        }
    }
}
