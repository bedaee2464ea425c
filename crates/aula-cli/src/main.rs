use aula_cli::actions;
use aula_cli::resources::ResourceKind;
use aula_cli::seeder::{self, SeedConfig};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "aula-cli")]
#[command(about = "Aula CLI - Administrative console for the Aula API", long_about = None)]
struct Cli {
    /// API base URL (defaults to AULA_API_URL or http://localhost:8000/api)
    #[arg(short = 'u', long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List records of a resource as a table
    List {
        resource: ResourceKind,

        #[arg(short = 'p', long, default_value = "1")]
        page: i64,

        #[arg(long, default_value = "10")]
        per_page: i64,

        /// Search term (server-side for paginated resources, local otherwise)
        #[arg(short = 's', long)]
        search: Option<String>,

        /// Column to sort by
        #[arg(long)]
        sort_by: Option<String>,

        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,

        /// Extra filters as campo=valor pairs (e.g. grupo_id=...)
        #[arg(short = 'f', long = "filter")]
        filters: Vec<String>,
    },
    /// Show one record
    Show {
        resource: ResourceKind,
        id: String,
    },
    /// Create a record from campo=valor pairs
    Create {
        resource: ResourceKind,

        /// Field values as campo=valor pairs
        #[arg(short = 's', long = "set")]
        fields: Vec<String>,

        /// Crest image for instituciones (uploaded as multipart)
        #[arg(long)]
        escudo: Option<std::path::PathBuf>,
    },
    /// Edit a record: loads it, applies campo=valor pairs, submits
    Edit {
        resource: ResourceKind,
        id: String,

        #[arg(short = 's', long = "set")]
        fields: Vec<String>,
    },
    /// Delete a record (asks for confirmation unless --yes)
    Delete {
        resource: ResourceKind,
        id: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Select several records interactively and delete them
    BulkDelete {
        resource: ResourceKind,

        #[arg(short = 'p', long, default_value = "1")]
        page: i64,

        #[arg(long, default_value = "10")]
        per_page: i64,

        #[arg(short = 's', long)]
        search: Option<String>,
    },
    /// Move a student from one group to another
    Transfer {
        /// Source group id
        #[arg(long)]
        grupo: String,

        /// Student id
        #[arg(long)]
        estudiante: String,

        /// Destination group id
        #[arg(long)]
        destino: String,

        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Seed the API with fake data (institution, campuses, groups, people)
    Seed {
        /// Number of grades to create
        #[arg(long, default_value = "6")]
        grados: usize,

        /// Number of groups per grade
        #[arg(long, default_value = "2")]
        grupos: usize,

        /// Number of students per group
        #[arg(long, default_value = "15")]
        estudiantes: usize,

        /// Number of teachers
        #[arg(long, default_value = "10")]
        docentes: usize,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let base_url = cli
        .api_url
        .unwrap_or_else(|| aula_config::ClientConfig::from_env().base_url);

    let result = match cli.command {
        Commands::List {
            resource,
            page,
            per_page,
            search,
            sort_by,
            desc,
            filters,
        } => {
            actions::list(
                &base_url, resource, page, per_page, search, sort_by, desc, filters,
            )
            .await
        }
        Commands::Show { resource, id } => actions::show(&base_url, resource, &id).await,
        Commands::Create {
            resource,
            fields,
            escudo,
        } => actions::create(&base_url, resource, fields, escudo).await,
        Commands::Edit {
            resource,
            id,
            fields,
        } => actions::edit(&base_url, resource, &id, fields).await,
        Commands::Delete { resource, id, yes } => {
            actions::delete(&base_url, resource, &id, yes).await
        }
        Commands::BulkDelete {
            resource,
            page,
            per_page,
            search,
        } => actions::bulk_delete(&base_url, resource, page, per_page, search).await,
        Commands::Transfer {
            grupo,
            estudiante,
            destino,
            yes,
        } => actions::transfer(&base_url, &grupo, &estudiante, &destino, yes).await,
        Commands::Seed {
            grados,
            grupos,
            estudiantes,
            docentes,
        } => {
            seeder::run(
                &base_url,
                SeedConfig {
                    grados,
                    grupos_por_grado: grupos,
                    estudiantes_por_grupo: estudiantes,
                    docentes,
                },
            )
            .await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
