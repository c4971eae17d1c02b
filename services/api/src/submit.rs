use crate::infra::ConfiguredDirectory;
use clap::Args;
use place_preference::config::AppConfig;
use place_preference::error::AppError;
use place_preference::workflows::preference::catalog::catalog_view;
use place_preference::workflows::preference::{
    FormError, HttpSubmissionClient, NotificationLevel, PreferenceForm, RecordingNotifier,
    Section, Slot, SubmissionGateway, SubmissionPayload,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// Employee ID to look up
    #[arg(long)]
    pub(crate) employee: String,
    /// Section1 option-set (option1..option3, composite ids accepted)
    #[arg(long, conflicts_with = "section1_places")]
    pub(crate) section1: Option<String>,
    /// Section1 places in slot order, comma separated
    #[arg(long, value_delimiter = ',', num_args = 1..=3)]
    pub(crate) section1_places: Vec<String>,
    /// Section2 option-set (option1..option3, composite ids accepted)
    #[arg(long, conflicts_with = "section2_places")]
    pub(crate) section2: Option<String>,
    /// Section2 places in slot order, comma separated
    #[arg(long, value_delimiter = ',', num_args = 1..=3)]
    pub(crate) section2_places: Vec<String>,
    /// Validate and print the payload without posting it
    #[arg(long)]
    pub(crate) dry_run: bool,
}

impl SubmitArgs {
    fn choice(&self, section: Section) -> (Option<&str>, &[String]) {
        match section {
            Section::Domestic => (self.section1.as_deref(), &self.section1_places),
            Section::Foreign => (self.section2.as_deref(), &self.section2_places),
        }
    }
}

pub(crate) fn run_catalog() {
    for section in catalog_view() {
        println!("{} ({})", section.section, section.title);
        for option in section.option_sets {
            let places = option
                .places
                .iter()
                .map(|place| format!("{}={}", place.id, place.name))
                .collect::<Vec<_>>()
                .join(", ");
            println!("  {:<8} {}", option.id, places);
        }
    }
}

pub(crate) async fn run_submit(args: SubmitArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let directory = ConfiguredDirectory::from_config(&config.directory, config.submission.timeout())?;
    let gateway = HttpSubmissionClient::new(
        config.submission.endpoint.as_str(),
        config.submission.timeout(),
    )?;
    let notifier = Arc::new(RecordingNotifier::default());
    let mut form = PreferenceForm::new(Arc::new(directory), Arc::new(gateway), notifier.clone());

    let outcome = fill_and_submit(&mut form, &args).await;

    for event in notifier.events() {
        let marker = match event.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Error => "!!",
        };
        println!("[{marker}] {}: {}", event.title, event.description);
    }

    let payload = outcome?;
    if args.dry_run {
        println!("Dry run, payload not sent to {}", config.submission.endpoint);
    }
    render_payload(&payload);
    Ok(())
}

async fn fill_and_submit<G>(
    form: &mut PreferenceForm<ConfiguredDirectory, G, RecordingNotifier>,
    args: &SubmitArgs,
) -> Result<SubmissionPayload, FormError>
where
    G: SubmissionGateway,
{
    form.load(&args.employee).await?;

    for section in Section::ordered() {
        match args.choice(section) {
            (Some(option), _) => {
                form.choose_option(section, option)?;
            }
            (None, places) => {
                for (slot, place) in Slot::ordered().into_iter().zip(places) {
                    form.set_slot(section, slot, place)?;
                }
            }
        }
    }

    if args.dry_run {
        return form.preview();
    }
    form.submit().await
}

fn render_payload(payload: &SubmissionPayload) {
    println!("Submission for {} ({})", payload.user_id(), payload.department());
    for section in Section::ordered() {
        println!(
            "  {:<9} {:<7} {}",
            section.label(),
            payload.section_option(section),
            payload.section_places(section).join(", ")
        );
    }
    println!("  Timestamp {}", payload.timestamp_iso());
}
