use std::path::Path;

use anyhow::{Context, bail};
use matrix_studio_edit::{EditorOptions, LayoutFile, MatrixEditState};

fn open(options: &EditorOptions, file: &Path) -> anyhow::Result<MatrixEditState> {
    let layout = LayoutFile::load(file).with_context(|| format!("loading {}", file.display()))?;
    Ok(MatrixEditState::from_layout(&layout, options))
}

fn write(state: &mut MatrixEditState, output: &Path) -> anyhow::Result<()> {
    state.export_file(output).with_context(|| format!("writing {}", output.display()))?;
    log::info!("wrote {}", output.display());
    Ok(())
}

pub fn new_layout(options: &EditorOptions, rows: usize, cols: usize, output: &Path, name: Option<String>) -> anyhow::Result<()> {
    let mut state = MatrixEditState::with_options(options);
    state.load_empty(rows, cols)?;
    state.set_name(name);
    write(&mut state, output)
}

pub fn info(options: &EditorOptions, file: &Path) -> anyhow::Result<()> {
    let state = open(options, file)?;
    let grid = state.grid();

    if let Some(name) = state.name() {
        println!("name:    {name}");
    }
    println!("size:    {}x{}", grid.rows(), grid.cols());
    println!("cells:   {} occupied", grid.occupied_count());

    println!("devices: {}", state.devices().len());
    for device in state.devices() {
        println!("  {:<24} {} pixels", device.id, device.pixel_count);
    }

    let groups = state.group_index();
    println!("groups:  {}", groups.len());
    for (name, members) in groups.iter() {
        println!("  {name:<24} {} cells", members.len());
    }

    let issues = state.validate_cells();
    if !issues.is_empty() {
        println!("invalid: {}", issues.len());
        for issue in &issues {
            println!("  {:<24} {}", issue.pos.to_string(), issue.error);
        }
    }
    Ok(())
}

pub fn resize(options: &EditorOptions, file: &Path, rows: usize, cols: usize, output: Option<&Path>) -> anyhow::Result<()> {
    let mut state = open(options, file)?;
    state.resize(rows, cols)?;
    write(&mut state, output.unwrap_or(file))
}

pub fn renumber(options: &EditorOptions, file: &Path, group: &str, start: i32, output: Option<&Path>) -> anyhow::Result<()> {
    let mut state = open(options, file)?;
    if !state.select_group(group) {
        bail!("no cell belongs to group '{group}'");
    }
    let count = state.selection().len();
    state.renumber_selection(start)?;
    log::info!("renumbered {count} cell(s) of '{group}' from {start}");
    write(&mut state, output.unwrap_or(file))
}

pub fn check(options: &EditorOptions, file: &Path) -> anyhow::Result<()> {
    let state = open(options, file)?;
    let issues = state.validate_cells();
    for issue in &issues {
        println!("{}: {}", issue.pos, issue.error);
    }
    if !issues.is_empty() {
        bail!("{} invalid cell(s) in {}", issues.len(), file.display());
    }
    println!("ok");
    Ok(())
}
