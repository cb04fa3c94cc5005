mod command;
mod driver;
mod record;
mod schema;
mod simulator;
mod sink;
mod source;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
