//! Asset inventory command handlers.

use tabled::Tabled;

use hrdesk_core::{Asset, AssetRequest, Attachment, AttachmentField, Console, CoreError};

use crate::cli::{AssetsArgs, AssetsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct AssetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Assigned To")]
    assigned_to: String,
}

impl From<&Asset> for AssetRow {
    fn from(a: &Asset) -> Self {
        Self {
            id: a.asset_id.clone(),
            name: a.name.clone(),
            category: util::or_dash(a.category.as_deref()),
            serial: util::or_dash(a.serial_number.as_deref()),
            status: a.status.to_string(),
            assigned_to: util::or_dash(a.assigned_to.as_deref()),
        }
    }
}

fn detail(a: &Asset) -> String {
    output::detail(&[
        ("ID", a.asset_id.clone()),
        ("Name", a.name.clone()),
        ("Category", a.category.clone().unwrap_or_default()),
        ("Serial", a.serial_number.clone().unwrap_or_default()),
        ("Status", a.status.to_string()),
        ("Assigned To", a.assigned_to.clone().unwrap_or_default()),
        ("Purchased", a.purchase_date.clone().unwrap_or_default()),
        (
            "Cost",
            a.purchase_cost.map(util::money).unwrap_or_default(),
        ),
    ])
}

pub async fn handle(
    console: &Console,
    args: AssetsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AssetsCommand::List => {
            let assets = console.fetch_assets().await?;
            let out = output::render_list(
                &global.output,
                &assets,
                |a| AssetRow::from(a),
                |a| a.asset_id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AssetsCommand::Get { id } => {
            let asset = console.fetch_asset(&id).await?;
            let out = output::render_single(&global.output, &asset, detail, |a| a.asset_id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AssetsCommand::Create { from_file, invoice } => {
            let body: AssetRequest = util::read_request(&from_file, console.company_id())?;
            let invoice = invoice
                .map(|path| Attachment::from_path(AttachmentField::InvoiceFile, &path))
                .transpose()
                .map_err(CoreError::from)?;
            let created = console.create_asset(&body, invoice).await?;
            output::success(
                &format!("Asset created ({})", created.asset_id),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        AssetsCommand::Update { id, from_file } => {
            let body: AssetRequest = util::read_request(&from_file, console.company_id())?;
            console.update_asset(&id, &body).await?;
            output::success("Asset updated", &global.color, global.quiet);
            Ok(())
        }

        AssetsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete asset {id}?"), global.yes)? {
                return Ok(());
            }
            console.delete_asset(&id).await?;
            output::success("Asset deleted", &global.color, global.quiet);
            Ok(())
        }

        AssetsCommand::Assign { id, employee } => {
            console.assign_asset(&id, Some(&employee)).await?;
            output::success(
                &format!("Asset {id} assigned to {employee}"),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        AssetsCommand::Release { id } => {
            console.assign_asset(&id, None).await?;
            output::success(&format!("Asset {id} released"), &global.color, global.quiet);
            Ok(())
        }
    }
}
