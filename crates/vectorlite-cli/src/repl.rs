//! Interactive shell over `VectorliteClient`.

use std::path::Path;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::client::VectorliteClient;
use crate::csv_import::read_csv;
use crate::literal::{parse_metadata, parse_vector};

const BATCH_SIZE: usize = 100;

pub struct Repl {
    client: VectorliteClient,
    server_url: String,
    selected_database: Option<String>,
}

impl Repl {
    #[must_use]
    pub fn new(server_url: String) -> Self {
        Self {
            client: VectorliteClient::new(server_url.clone()),
            server_url,
            selected_database: None,
        }
    }

    pub async fn run(&mut self) {
        println!("vectorlite Interactive Client");
        println!("Connected to: {}", self.server_url);
        println!("Type 'help' for commands or 'quit' to exit\n");

        let mut stdin = BufReader::new(tokio::io::stdin()).lines();
        loop {
            self.print_prompt().await;

            let Ok(Some(line)) = stdin.next_line().await else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line == "quit" || line == "exit" {
                println!("Goodbye!");
                break;
            }

            self.dispatch(line).await;
        }
    }

    async fn print_prompt(&self) {
        let prompt = match &self.selected_database {
            Some(name) => format!("vectorlite[{name}]> "),
            None => "vectorlite> ".to_string(),
        };
        print!("{prompt}");
        let _ = tokio::io::stdout().flush().await;
    }

    async fn dispatch(&mut self, input: &str) {
        let mut parts = input.split_whitespace();
        let Some(command) = parts.next() else { return };
        let args: Vec<&str> = parts.collect();

        match command {
            "help" => self.show_help(),
            "status" => self.status().await,
            "create-db" => self.create_db(&args).await,
            "use-db" => self.use_db(&args),
            "list-dbs" => self.list_dbs().await,
            "add" => self.add(&args).await,
            "query" => self.query(&args).await,
            "list" => self.list().await,
            "import" => self.import(&args).await,
            other => println!("Unknown command: {other}. Type 'help' for available commands."),
        }
    }

    fn show_help(&self) {
        println!("Available commands:");
        println!("  help                          - Show this help message");
        println!("  status                        - Check server connection");
        println!("  create-db <name> <algorithm>  - Create a new database");
        println!("    Example: create-db mydb bruteforce");
        println!("    Algorithms: bruteforce, hnsw");
        println!("  use-db <name>                 - Select database to use");
        println!("    Example: use-db mydb");
        println!("  list-dbs                      - List all databases");
        println!("  add <vector> <metadata>       - Add vector entry");
        println!("    Example: add [1.0,2.0,3.0] name=test,type=example");
        println!("  query <vector> <k> <metric>   - Query similar vectors");
        println!("    Example: query [1.0,2.0,3.0] 5 cosine");
        println!("    Metrics: cosine, dot_product, euclidean");
        println!("  import <file>                 - Import vectors from file");
        println!("    Example: import vectors.csv");
        println!("    Supported formats: CSV");
        println!("  list                          - List all entries");
        println!("  quit/exit                     - Exit the client");
    }

    async fn status(&self) {
        match self.client.ping().await {
            Ok(status) if status.is_success() => println!("Server is running and accessible"),
            Ok(status) => println!("Server responded with status: {status}"),
            Err(err) => println!("Error connecting to server: {err}"),
        }
    }

    async fn create_db(&self, args: &[&str]) {
        let [name, algorithm] = args else {
            println!("Usage: create-db <name> <algorithm>");
            println!("Example: create-db mydb bruteforce");
            println!("Algorithms: bruteforce, hnsw");
            return;
        };
        if *algorithm != "bruteforce" && *algorithm != "hnsw" {
            println!("Invalid algorithm: {algorithm}. Use: bruteforce or hnsw");
            return;
        }
        match self.client.create_database(name, algorithm).await {
            Ok(()) => println!("Database '{name}' created successfully with algorithm '{algorithm}'"),
            Err(err) => println!("Error creating database: {err}"),
        }
    }

    fn use_db(&mut self, args: &[&str]) {
        let [name] = args else {
            println!("Usage: use-db <name>");
            println!("Example: use-db mydb");
            return;
        };
        self.selected_database = Some((*name).to_string());
        println!("Now using database: {name}");
    }

    async fn list_dbs(&self) {
        match self.client.list_databases().await {
            Ok(databases) => {
                println!("Available databases ({}):", databases.len());
                for (i, name) in databases.iter().enumerate() {
                    let marker = if Some(name) == self.selected_database.as_ref() {
                        " (selected)"
                    } else {
                        ""
                    };
                    println!("{}. {name}{marker}", i + 1);
                }
            }
            Err(err) => println!("Error listing databases: {err}"),
        }
    }

    fn require_database(&self) -> Option<&str> {
        if self.selected_database.is_none() {
            println!("Error: No database selected. Use 'use-db <name>' to select a database first.");
        }
        self.selected_database.as_deref()
    }

    async fn add(&self, args: &[&str]) {
        let Some(database) = self.require_database() else { return };
        let [vector_arg, metadata_arg] = args else {
            println!("Usage: add <vector> <metadata>");
            println!("Example: add [1.0,2.0,3.0] name=test,type=example");
            return;
        };

        let vector = match parse_vector(vector_arg) {
            Ok(v) => v,
            Err(err) => return println!("Error parsing vector: {err}"),
        };
        let metadata = match parse_metadata(metadata_arg) {
            Ok(m) => m,
            Err(err) => return println!("Error parsing metadata: {err}"),
        };

        match self.client.add_entries(database, &[vector], &[metadata]).await {
            Ok(()) => println!("Entry added successfully"),
            Err(err) => println!("Error adding entry: {err}"),
        }
    }

    async fn query(&self, args: &[&str]) {
        let Some(database) = self.require_database() else { return };
        let [vector_arg, k_arg, metric] = args else {
            println!("Usage: query <vector> <k> <metric>");
            println!("Example: query [1.0,2.0,3.0] 5 cosine");
            println!("Metrics: cosine, dot_product, euclidean");
            return;
        };

        let vector = match parse_vector(vector_arg) {
            Ok(v) => v,
            Err(err) => return println!("Error parsing vector: {err}"),
        };
        let Ok(k) = k_arg.parse::<usize>() else {
            println!("Error parsing k: invalid digit found in string");
            return;
        };
        if !matches!(*metric, "cosine" | "dot_product" | "euclidean") {
            println!("Invalid metric: {metric}. Use: cosine, dot_product, or euclidean");
            return;
        }

        match self.client.query(database, &vector, k, metric).await {
            Ok(entries) => {
                println!("Found {} similar entries:", entries.len());
                for (i, entry) in entries.iter().enumerate() {
                    println!("{}. ID: {}", i + 1, entry.id);
                    println!("   Vector: {:?}", entry.vector);
                    println!("   Metadata: {:?}", entry.metadata);
                    println!();
                }
            }
            Err(err) => println!("Error querying: {err}"),
        }
    }

    async fn list(&self) {
        let Some(database) = self.require_database() else { return };
        match self.client.list_entries(database).await {
            Ok(entries) => {
                println!("Total entries: {}", entries.len());
                for (i, entry) in entries.iter().enumerate() {
                    println!("{}. ID: {}", i + 1, entry.id);
                    println!("   Vector: {:?}", entry.vector);
                    println!("   Metadata: {:?}", entry.metadata);
                    println!();
                }
            }
            Err(err) => println!("Error listing entries: {err}"),
        }
    }

    async fn import(&self, args: &[&str]) {
        let Some(database) = self.require_database() else { return };
        let [filename] = args else {
            println!("Usage: import <file>");
            println!("Example: import vectors.csv");
            println!("Supported formats: CSV");
            return;
        };

        let path = Path::new(filename);
        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            println!("Unsupported file format: {:?}", path.extension());
            println!("Supported formats: .csv");
            return;
        }

        let (records, warnings) = match read_csv(path) {
            Ok(result) => result,
            Err(err) => return println!("Error importing CSV: {err}"),
        };
        for warning in &warnings {
            println!("Warning: skipping {warning}");
        }

        println!("Importing {} vectors in batches of {BATCH_SIZE}...", records.len());
        for (batch_index, chunk) in records.chunks(BATCH_SIZE).enumerate() {
            let vectors: Vec<Vec<f64>> = chunk.iter().map(|r| r.vector.clone()).collect();
            let metadatas: Vec<_> = chunk.iter().map(|r| r.metadata.clone()).collect();
            if let Err(err) = self.client.add_entries(database, &vectors, &metadatas).await {
                return println!("Error importing batch {}: {err}", batch_index + 1);
            }
            println!("Imported batch {} ({} vectors)", batch_index + 1, chunk.len());
        }

        println!("Successfully imported vectors from {filename}");
    }
}
