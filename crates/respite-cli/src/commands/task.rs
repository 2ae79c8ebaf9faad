use clap::Subcommand;
use respite_core::storage::Store;
use respite_core::tasks::TaskList;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add { text: Vec<String> },
    /// List tasks
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle completion by index (as shown by `list`)
    Toggle { index: usize },
    /// Delete a task by index
    Delete { index: usize },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let mut list = TaskList::load(&store)?;

    match action {
        TaskAction::Add { text } => {
            let text = text.join(" ");
            if list.add(&store, &text)? {
                println!("added: {}", text.trim());
            } else {
                println!("nothing to add");
            }
        }
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(list.tasks())?);
            } else if list.is_empty() {
                println!("no tasks");
            } else {
                for (index, task) in list.tasks().iter().enumerate() {
                    let mark = if task.completed { "x" } else { " " };
                    println!("{index:>3} [{mark}] {}", task.text);
                }
            }
        }
        TaskAction::Toggle { index } => {
            if list.toggle(&store, index)? {
                let task = &list.tasks()[index];
                let state = if task.completed { "done" } else { "open" };
                println!("{}: {state}", task.text);
            } else {
                println!("no task at index {index}");
            }
        }
        TaskAction::Delete { index } => {
            if list.delete(&store, index)? {
                println!("deleted task {index}");
            } else {
                println!("no task at index {index}");
            }
        }
    }
    Ok(())
}
