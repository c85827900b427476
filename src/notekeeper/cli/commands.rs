use super::print::{print_full_note, print_notices, print_page};
use super::setup::{Cli, Commands};
use directories::ProjectDirs;
use notekeeper::api::Notekeeper;
use notekeeper::config::NotekeeperConfig;
use notekeeper::error::{NotekeeperError, Result};
use notekeeper::notify::NoticeLog;
use notekeeper::store::fs::FileStore;
use std::path::PathBuf;

pub struct AppContext {
    app: Notekeeper<FileStore, NoticeLog>,
    config: NotekeeperConfig,
    data_dir: PathBuf,
}

/// Runs one command. Returns whether any error notice was shown.
pub fn run(cli: Cli) -> Result<bool> {
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Config { key, value }) => return handle_config(&mut ctx, key, value),
        command => {
            if !load(&mut ctx) {
                return Ok(true);
            }
            match command {
                Some(Commands::List { page }) => handle_list(&mut ctx, page),
                Some(Commands::Add {
                    title,
                    tagline,
                    body,
                }) => handle_add(&mut ctx, title, tagline, body),
                Some(Commands::Edit {
                    id,
                    title,
                    tagline,
                    body,
                }) => handle_edit(&mut ctx, &id, title, tagline, body)?,
                Some(Commands::View { id }) => handle_view(&ctx, &id)?,
                Some(Commands::Pin { id }) => handle_pin(&mut ctx, &id)?,
                Some(Commands::Delete { id }) => handle_delete(&mut ctx, &id)?,
                Some(Commands::Config { .. }) | None => handle_list(&mut ctx, 1),
            }
        }
    }

    Ok(flush_notices(&mut ctx))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("com", "notekeeper", "notekeeper")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| NotekeeperError::Config("Could not determine data dir".into()))?,
    };

    let config = NotekeeperConfig::load(&data_dir)?;
    let store = FileStore::new(data_dir.clone()).with_collection(&config.collection);
    let app = Notekeeper::new(store, NoticeLog::new(), config.page_size);

    Ok(AppContext {
        app,
        config,
        data_dir,
    })
}

/// Fills the cache. The load confirmation is not shown; a failure is.
fn load(ctx: &mut AppContext) -> bool {
    let loaded = ctx.app.refresh().is_some();
    let notices = ctx.app.sink_mut().drain();
    if !loaded {
        print_notices(&notices);
    }
    loaded
}

fn flush_notices(ctx: &mut AppContext) -> bool {
    let had_errors = ctx.app.sink().has_errors();
    print_notices(&ctx.app.sink_mut().drain());
    had_errors
}

fn handle_list(ctx: &mut AppContext, page: usize) {
    ctx.app.change_page(page);
    print_page(&ctx.app.visible());
}

fn handle_add(ctx: &mut AppContext, title: String, tagline: String, body: String) {
    ctx.app.open_create();
    let form = ctx.app.form_mut();
    form.set_title(title);
    form.set_tagline(tagline);
    form.set_body(body);
    ctx.app.submit_draft();
}

fn handle_edit(
    ctx: &mut AppContext,
    id: &str,
    title: Option<String>,
    tagline: Option<String>,
    body: Option<String>,
) -> Result<()> {
    if title.is_none() && tagline.is_none() && body.is_none() {
        return Err(NotekeeperError::ValidationFailed(
            "Nothing to change: pass --title, --tagline or --body".into(),
        ));
    }

    let id = ctx.app.resolve(id)?;
    if !ctx.app.edit(&id) {
        return Ok(());
    }

    let form = ctx.app.form_mut();
    if let Some(title) = title {
        form.set_title(title);
    }
    if let Some(tagline) = tagline {
        form.set_tagline(tagline);
    }
    if let Some(body) = body {
        form.set_body(body);
    }
    ctx.app.submit_draft();
    ctx.app.close_form();
    Ok(())
}

fn handle_view(ctx: &AppContext, id: &str) -> Result<()> {
    let id = ctx.app.resolve(id)?;
    if let Some(note) = ctx.app.find(&id) {
        print_full_note(note);
    }
    Ok(())
}

fn handle_pin(ctx: &mut AppContext, id: &str) -> Result<()> {
    let id = ctx.app.resolve(id)?;
    ctx.app.toggle_pin(&id);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: &str) -> Result<()> {
    let id = ctx.app.resolve(id)?;
    ctx.app.delete(&id);
    Ok(())
}

fn handle_config(
    ctx: &mut AppContext,
    key: Option<String>,
    value: Option<String>,
) -> Result<bool> {
    match (key, value) {
        (None, _) => {
            println!("page-size = {}", ctx.config.page_size);
            println!("collection = {}", ctx.config.collection);
        }
        (Some(key), None) => println!("{}", ctx.config.get(&key)?),
        (Some(key), Some(value)) => {
            ctx.config.set(&key, &value)?;
            ctx.config.save(&ctx.data_dir)?;
            println!("{} = {}", key, ctx.config.get(&key)?);
        }
    }
    Ok(false)
}
