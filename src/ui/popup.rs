/// Popup UI for the PhoSent extension

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use patternfly_yew::prelude::*;

use crate::api::HttpAnalysisApi;
use crate::chrome::ChromeRuntime;
use crate::config::ExtensionConfig;
use crate::controller::{load_market_overview, refresh_market_overview, run_analysis, FlowState, MarketState};
use crate::ui::components::{ArticleResults, ErrorPanel, MarketPanel};

#[derive(Properties, PartialEq)]
pub struct AppProps {
    #[prop_or_default]
    pub config: ExtensionConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let market = use_state(|| MarketState::Loading);
    let refreshing = use_state(|| false);
    let refresh_error = use_state(|| None::<String>);
    let flow = use_state(|| FlowState::Idle);

    // Load the market overview on mount
    {
        let market = market.clone();
        let endpoints = props.config.api.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                let api = HttpAnalysisApi::new(endpoints.clone());
                market.set(load_market_overview(&api, &endpoints.market_data_url).await);
            });
            || ()
        });
    }

    // Refresh market data handler; a failed refresh keeps the current overview
    let on_refresh = {
        let market = market.clone();
        let refreshing = refreshing.clone();
        let refresh_error = refresh_error.clone();
        let endpoints = props.config.api.clone();

        Callback::from(move |_| {
            let market = market.clone();
            let refreshing = refreshing.clone();
            let refresh_error = refresh_error.clone();
            let endpoints = endpoints.clone();

            refreshing.set(true);
            refresh_error.set(None);

            spawn_local(async move {
                let api = HttpAnalysisApi::new(endpoints.clone());
                match refresh_market_overview(&api, &endpoints).await {
                    Ok(state) => market.set(state),
                    Err(text) => refresh_error.set(Some(text)),
                }
                refreshing.set(false);
            });
        })
    };

    // Analyze article handler
    let on_analyze = {
        let flow = flow.clone();
        let site = props.config.site.clone();

        Callback::from(move |_| {
            let flow = flow.clone();
            let site = site.clone();

            spawn_local(async move {
                run_analysis(&ChromeRuntime, &site, |state| flow.set(state.clone())).await;
            });
        })
    };

    let is_busy = flow.is_busy();

    if let MarketState::Unavailable(message) = &*market {
        return html! {
            <div class="padding-20">
                <h1 class="popup-title">{"PhoSent"}</h1>
                <ErrorPanel message={message.clone()} />
            </div>
        };
    }

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"PhoSent"}</h1>

            // Market overview
            <div class="stats-container">
                <h2 class="stats-title">{"Market overview"}</h2>
                <MarketPanel state={(*market).clone()} />
                if let Some(text) = &*refresh_error {
                    <Alert r#type={AlertType::Warning} title={"Refresh failed"} inline={true}>
                        {text.clone()}
                    </Alert>
                }
                <Button
                    onclick={on_refresh}
                    disabled={*refreshing || matches!(*market, MarketState::Loading)}
                    variant={ButtonVariant::Secondary}
                    block={true}
                >
                    {"Refresh market data"}
                </Button>
            </div>

            // Single article analysis
            <div class="flex-column-gap">
                <Button onclick={on_analyze} disabled={is_busy} variant={ButtonVariant::Primary} block={true}>
                    {format!("Analyze this {} article", props.config.site.name)}
                </Button>

                {match &*flow {
                    FlowState::Idle => html! {
                        <p id="analysis-status" class="message-text">{"Waiting for analysis..."}</p>
                    },
                    FlowState::Rendering(view) => html! {
                        <ArticleResults view={view.clone()} />
                    },
                    FlowState::Failed(err) => html! {
                        <div class="message-top-margin">
                            <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                                {err.clone()}
                            </Alert>
                        </div>
                    },
                    busy => html! {
                        <div class="loading-text-center">
                            <Spinner />
                            <p id="analysis-status" class="loading-text">
                                {busy.status_text().unwrap_or_default()}
                            </p>
                        </div>
                    },
                }}
            </div>

            <p class="footer-popup">
                {"PhoSent v0.1.0"}
            </p>
        </div>
    }
}
