mod config;
mod render;
mod transport;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use jobboard_core::{
    facets, update, ApiError, CreateJob, Effect, JobClient, ListingState, Msg, Operation, SortOrder,
    UpdateJob,
};

use config::Config;
use transport::Transport;

#[derive(Parser)]
#[command(author, version, about = "Browse and manage job postings", long_about = None)]
struct Cli {
    /// API base URL; overrides JOBBOARD_API_URL
    #[clap(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List jobs, newest first unless --sort says otherwise
    List {
        /// Free text; matched against known companies and locations first
        #[clap(long, conflicts_with_all = ["company", "location"])]
        search: Option<String>,
        #[clap(long, conflicts_with = "location")]
        company: Option<String>,
        #[clap(long)]
        location: Option<String>,
        /// newest, oldest, company-az, company-za, salary-high-low, salary-low-high
        #[clap(long, default_value = "newest")]
        sort: SortOrder,
        /// Also print country and city counts
        #[clap(long)]
        facets: bool,
    },
    /// Show one job
    Show { id: i64 },
    /// Create a job
    Create {
        #[clap(long)]
        title: String,
        #[clap(long)]
        company: String,
        #[clap(long, default_value = "")]
        location: String,
        #[clap(long, default_value = "")]
        description: String,
        #[clap(long, default_value = "")]
        url: String,
        #[clap(long, default_value = "")]
        salary: String,
    },
    /// Update fields of a job
    Update {
        id: i64,
        #[clap(long)]
        title: Option<String>,
        #[clap(long)]
        company: Option<String>,
        #[clap(long)]
        location: Option<String>,
        #[clap(long)]
        description: Option<String>,
        #[clap(long)]
        url: Option<String>,
        #[clap(long)]
        salary: Option<String>,
        #[clap(long)]
        active: Option<bool>,
    },
    /// Delete a job
    Delete { id: i64 },
}

struct App {
    client: JobClient,
    transport: Transport,
}

impl App {
    fn new(config: &Config) -> Self {
        Self {
            client: JobClient::new(&config.api_url),
            transport: Transport::new(),
        }
    }

    /// Feed `msg` through the listing view, running fetch effects until
    /// the view settles.
    fn drive(&self, state: ListingState, msg: Msg) -> ListingState {
        let (mut state, mut pending) = update(state, msg);
        while let Some(Effect::Fetch { generation, query }) = pending.pop() {
            let req = self.client.build_list_jobs(&query);
            let msg = match self
                .transport
                .execute(req)
                .and_then(|resp| self.client.parse_list_jobs(resp))
            {
                Ok(jobs) => Msg::FetchSucceeded {
                    generation,
                    jobs,
                    now: chrono::Utc::now(),
                },
                Err(error) => Msg::FetchFailed { generation, error },
            };
            let (next, effects) = update(state, msg);
            state = next;
            pending.extend(effects);
        }
        state
    }

    fn list(
        &self,
        search: Option<String>,
        company: Option<String>,
        location: Option<String>,
        sort: SortOrder,
        show_facets: bool,
    ) -> Result<()> {
        let (state, _) = update(ListingState::new(), Msg::SortChanged(sort));
        // Known companies and locations come from an unfiltered fetch first.
        let mut state = self.drive(state, Msg::Refresh);
        if let Some(company) = company {
            state = self.drive(state, Msg::CompanyFilterSelected(company));
        } else if let Some(location) = location {
            state = self.drive(state, Msg::LocationFilterSelected(location));
        } else if let Some(search) = search {
            state = self.drive(state, Msg::SearchChanged(search));
        }

        print!("{}", render::listing_view(state.view()));
        if show_facets {
            print!("\n{}", render::facets(&facets(state.listings())));
        }
        Ok(())
    }

    fn show(&self, id: i64) -> Result<()> {
        let job = self
            .transport
            .execute(self.client.build_get_job(id))
            .and_then(|resp| self.client.parse_get_job(resp))
            .map_err(|e| report(Operation::LoadJob, e))?;
        print!("{}", render::job_detail(&job));
        Ok(())
    }

    fn create(&self, input: CreateJob) -> Result<()> {
        let req = self
            .client
            .build_create_job(&input)
            .map_err(|e| report(Operation::Create, e))?;
        let job = self
            .transport
            .execute(req)
            .and_then(|resp| self.client.parse_create_job(resp))
            .map_err(|e| report(Operation::Create, e))?;
        log::info!("created job {}", job.id);
        print!("{}", render::job_detail(&job));
        Ok(())
    }

    fn update(&self, id: i64, input: UpdateJob) -> Result<()> {
        let req = self
            .client
            .build_update_job(id, &input)
            .map_err(|e| report(Operation::Update, e))?;
        let job = self
            .transport
            .execute(req)
            .and_then(|resp| self.client.parse_update_job(resp))
            .map_err(|e| report(Operation::Update, e))?;
        print!("{}", render::job_detail(&job));
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<()> {
        self.transport
            .execute(self.client.build_delete_job(id))
            .and_then(|resp| self.client.parse_delete_job(resp))
            .map_err(|e| report(Operation::Delete, e))?;
        log::info!("deleted job {id}");
        println!("Deleted job {id}");
        Ok(())
    }
}

/// Log the underlying error and turn it into the message users see.
/// Validation problems are shown per field since no request was made;
/// everything else gets the operation's generic message.
fn report(op: Operation, err: ApiError) -> anyhow::Error {
    match err {
        ApiError::Validation(errors) => {
            let fields: Vec<&str> = errors.iter().map(|e| e.message).collect();
            anyhow!(fields.join("\n"))
        }
        other => {
            log::error!("{op:?} failed: {other}");
            anyhow!(op.failure_message())
        }
    }
}

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();
    let args = Cli::parse();
    let config = Config::load(args.api_url);
    log::debug!("using API at {}", config.api_url);
    let app = App::new(&config);

    match args.command {
        Commands::List {
            search,
            company,
            location,
            sort,
            facets,
        } => app.list(search, company, location, sort, facets),
        Commands::Show { id } => app.show(id),
        Commands::Create {
            title,
            company,
            location,
            description,
            url,
            salary,
        } => app.create(CreateJob {
            title,
            company,
            location,
            description,
            url,
            salary,
        }),
        Commands::Update {
            id,
            title,
            company,
            location,
            description,
            url,
            salary,
            active,
        } => app.update(
            id,
            UpdateJob {
                title,
                company,
                location,
                description,
                url,
                salary,
                is_active: active,
            },
        ),
        Commands::Delete { id } => app.delete(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use jobboard_core::{CreateJob, JobClient};

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn validation_errors_are_listed_per_field() {
        let err = JobClient::default()
            .build_create_job(&CreateJob::default())
            .unwrap_err();
        let message = report(Operation::Create, err).to_string();
        assert_eq!(message, "Job title is required\nCompany name is required");
    }

    #[test]
    fn not_found_gets_the_generic_message() {
        for op in [Operation::LoadJob, Operation::Update, Operation::Delete] {
            let message = report(op, ApiError::NotFound).to_string();
            assert_eq!(message, op.failure_message(), "{op:?}");
        }
    }

    #[test]
    fn server_and_transport_failures_get_the_generic_message() {
        let http = ApiError::HttpError {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(
            report(Operation::Delete, http).to_string(),
            "Failed to delete job. Please try again."
        );
        let transport = ApiError::Transport("connection refused".to_string());
        assert_eq!(
            report(Operation::LoadJob, transport).to_string(),
            "Failed to load job. Please try again."
        );
        let garbled = ApiError::Deserialization("expected value".to_string());
        assert_eq!(
            report(Operation::Create, garbled).to_string(),
            Operation::Create.failure_message()
        );
    }

    #[test]
    fn list_filters_conflict_instead_of_being_ignored() {
        let parsed = Cli::try_parse_from([
            "jobboard", "list", "--company", "Acme", "--location", "London",
        ]);
        assert!(parsed.is_err());
        let parsed = Cli::try_parse_from(["jobboard", "list", "--search", "pricing", "--company", "Acme"]);
        assert!(parsed.is_err());
        let parsed = Cli::try_parse_from(["jobboard", "list", "--location", "London", "--sort", "oldest"]);
        assert!(parsed.is_ok());
    }
}
