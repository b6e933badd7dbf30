//! Document-number series handlers.

use hrdesk_core::{Console, DocumentKind, DocumentSettings};

use crate::cli::{DocumentKindArg, DocumentsArgs, DocumentsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

fn kind(arg: DocumentKindArg) -> DocumentKind {
    match arg {
        DocumentKindArg::Invoice => DocumentKind::Invoice,
        DocumentKindArg::Quotation => DocumentKind::Quotation,
        DocumentKindArg::PurchaseOrder => DocumentKind::PurchaseOrder,
        DocumentKindArg::SalesOrder => DocumentKind::SalesOrder,
        DocumentKindArg::CreditNote => DocumentKind::CreditNote,
    }
}

fn settings_detail(s: &DocumentSettings) -> String {
    output::detail(&[
        ("Series", s.kind.to_string()),
        ("Prefix", s.prefix.clone()),
        ("Suffix", s.suffix.clone().unwrap_or_default()),
        ("Next number", s.next_number.to_string()),
        ("Padding", s.padding.to_string()),
    ])
}

pub async fn handle(
    console: &Console,
    args: DocumentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DocumentsCommand::Settings { kind: arg } => {
            let settings = console.fetch_document_settings(kind(arg)).await?;
            let out = output::render_single(&global.output, &settings, settings_detail, |s| {
                s.prefix.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DocumentsCommand::Update {
            kind: arg,
            prefix,
            suffix,
            next_number,
            padding,
        } => {
            let mut settings = console.fetch_document_settings(kind(arg)).await?;
            if let Some(prefix) = prefix {
                settings.prefix = prefix;
            }
            if let Some(suffix) = suffix {
                settings.suffix = Some(suffix).filter(|s| !s.is_empty());
            }
            if let Some(n) = next_number {
                settings.next_number = n;
            }
            if let Some(p) = padding {
                settings.padding = p;
            }
            console.update_document_settings(&settings).await?;
            output::success(
                &format!("{} numbering updated", settings.kind),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        DocumentsCommand::Preview { kind: arg } => {
            let preview = console.preview_document_number(kind(arg)).await?;
            let out = output::render_single(
                &global.output,
                &preview,
                |p| format!("Next {}: {}", p.kind, p.document_number),
                |p| p.document_number.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
