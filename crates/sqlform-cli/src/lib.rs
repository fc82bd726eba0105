mod cli;
mod form;
mod init;
mod logging;
mod output;

use anyhow::Context;

pub fn run(args: Vec<String>) -> anyhow::Result<()> {
    let invocation = cli::parse_args(&args)?;
    logging::init(invocation.verbose);

    match invocation.command {
        cli::Command::Help(topic) => {
            cli::print_help(topic);
            Ok(())
        }
        cli::Command::Compose(args) => {
            let sql = sqlform::compose(&args.request).context("cannot compose statement")?;
            output::print_sql(&sql, args.json)
        }
        cli::Command::Form(args) => {
            let request = form::load(&args.form)?;
            let sql = sqlform::compose(&request).with_context(|| {
                format!("cannot compose statement from {}", args.form.display())
            })?;
            output::print_sql(&sql, args.json)
        }
        cli::Command::Init(args) => init::run(args),
        cli::Command::Filters(args) => {
            let rows = sqlform::filter_rows(&args.fields, args.syntax)
                .context("cannot build filter rows")?;
            output::print_filter_rows(&rows, args.json)
        }
    }
}
