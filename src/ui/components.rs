/// Reusable UI components

use yew::prelude::*;

use crate::controller::MarketState;
use crate::display::{ArticleAnalysisView, NO_TICKERS_NOTICE};

#[derive(Properties, PartialEq)]
pub struct MarketPanelProps {
    pub state: MarketState,
}

#[function_component(MarketPanel)]
pub fn market_panel(props: &MarketPanelProps) -> Html {
    match &props.state {
        MarketState::Loading => html! {
            <div class="market-overview">
                <span class="market-score">{"…"}</span>
                <span class="label">{"Loading market data"}</span>
            </div>
        },
        MarketState::Ready(view) => html! {
            <div class="market-overview">
                <span id="market-score" class="market-score">{&view.score}</span>
                <span id="market-evaluation" class={classes!("label", view.evaluation_class.clone())}>
                    {&view.evaluation}
                </span>
            </div>
        },
        // The popup swaps the whole view for an ErrorPanel instead
        MarketState::Unavailable(_) => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct ArticleResultsProps {
    pub view: ArticleAnalysisView,
}

#[function_component(ArticleResults)]
pub fn article_results(props: &ArticleResultsProps) -> Html {
    let view = &props.view;

    html! {
        <div id="single-article-results" class="results-container">
            <p
                id="single-article-sentiment"
                class={classes!("news-sentiment-summary", view.sentiment_class.clone())}
            >
                {&view.sentiment}
            </p>
            <h3 class="results-heading">{"Sector"}</h3>
            <div id="single-article-industry-list" class="industry-list">
                <span>{&view.sector}</span>
            </div>
            <h3 class="results-heading">{"Stock tickers"}</h3>
            <div id="single-article-stock-list" class="stock-list">
                if view.tickers.is_empty() {
                    {NO_TICKERS_NOTICE}
                } else {
                    {for view.tickers.iter().map(|ticker| html! {
                        <span class="stock-ticker">{ticker}</span>
                    })}
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorPanelProps {
    pub message: String,
}

#[function_component(ErrorPanel)]
pub fn error_panel(props: &ErrorPanelProps) -> Html {
    html! {
        <div class="error-message">
            <p class="message-paragraph">{&props.message}</p>
        </div>
    }
}
