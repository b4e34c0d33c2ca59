//! CLI command handler bridging arguments to library operations

use crate::cli_bin::args::Cli;
use learnr_to_rmd::io::resolve_inputs;
use learnr_to_rmd::{
    convert_all, Converter, ConverterConfig, HeaderTemplate, Renderer, Result, RscriptRenderer,
    SkipRenderer,
};
use log::{debug, error, info, warn};

/// Build the converter configuration from the CLI flags
pub fn converter_config(cli: &Cli) -> ConverterConfig {
    ConverterConfig {
        header: HeaderTemplate {
            toc: !cli.no_toc,
            fig_path: cli.fig_path.clone(),
            ..Default::default()
        },
        extra_skip_suffixes: cli.drop_suffixes.clone(),
    }
}

/// Build the renderer selected by the CLI flags
pub fn renderer(cli: &Cli, header: &HeaderTemplate) -> Box<dyn Renderer> {
    if cli.no_render {
        return Box::new(SkipRenderer);
    }
    Box::new(RscriptRenderer {
        program: cli.rscript.clone(),
        output_format: header.output_format.clone(),
        toc: header.toc,
    })
}

/// Execute the conversion
pub fn convert_command(cli: &Cli) -> Result<()> {
    debug!("Executing convert command with args: {:?}", cli);

    let files = resolve_inputs(&cli.files);
    if files.is_empty() {
        warn!("No files found to process");
        return Ok(());
    }

    let converter = Converter::with_config(converter_config(cli))?;
    let renderer = renderer(cli, converter.header());

    let converted = convert_all(&converter, renderer.as_ref(), &files).inspect_err(|err| {
        if err.is_render_error() {
            error!("Rendering failed; the converted document was kept");
            info!("Pass --no-render to convert without rendering");
        }
    })?;
    info!("Processed {} files", converted.len());
    Ok(())
}
