use clap::Parser;
use prefill::mapping::JsonFileMappingStore;
use prefill::prelude::*;
use std::fs;
use std::sync::Arc;

/// Inspect the prefill sources and stored mappings of a form graph.
#[derive(Parser, Debug)]
#[command(name = "prefill-cli", version, about)]
struct Cli {
    /// Path to the graph package JSON (nodes, edges, forms)
    graph: String,

    /// Target node id to resolve sources for
    #[arg(short, long)]
    node: String,

    /// Path to a mappings JSON file (flat entry list)
    #[arg(short, long)]
    mappings: Option<String>,

    /// Comma-separated source type allow-list, e.g. "Global,Direct"
    #[arg(short, long)]
    sources: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let graph_json = fs::read_to_string(&cli.graph)?;
    let graph = Arc::new(FormGraph::from_json(&graph_json)?);
    let target = graph
        .node(&cli.node)
        .ok_or_else(|| format!("node '{}' not found in graph", cli.node))?
        .clone();

    let filter = cli
        .sources
        .as_deref()
        .map(SourceTypeFilter::parse)
        .transpose()?;

    let resolver = SourceResolver::new(Arc::clone(&graph), vec![]);
    let mut sources = resolver.resolve(&target.id, filter.as_ref());
    sort_sources(&mut sources);

    println!("Sources for '{}' ({}):", target.data.name, target.id);
    for source in &sources {
        let classification = source
            .source_type
            .map_or_else(|| "Unclassified".to_string(), |t| t.to_string());
        println!("  [{classification}] {} ({})", source.label, source.id);
    }

    let Some(mappings_path) = cli.mappings else {
        return Ok(());
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(print_mappings(&mappings_path, &graph, &target, &sources))
}

async fn print_mappings(
    mappings_path: &str,
    graph: &FormGraph,
    target: &FormNode,
    sources: &[DataSource],
) -> Result<()> {
    let store = JsonFileMappingStore::new(mappings_path);
    let mapping_set = MappingSet::restructure(&store.load().await?);
    let session = ResolverSession::new();

    let Some(form) = graph.form_for(target) else {
        println!("No form metadata for '{}'; nothing to render", target.id);
        return Ok(());
    };

    println!("Mappings for '{}':", target.data.name);
    for field in form.ordered_fields() {
        let Some(mapping) = mapping_set.get(&target.id, &field.id) else {
            continue;
        };
        let text = resolve_mapping_text(&field.name, mapping, sources, &session).await?;
        println!("  {text}");
    }
    Ok(())
}
