//! UI components for the teleportation demo.

use teleport_ui::chart::MeasurementBar;
use teleport_ui::controller::{
    BLOCH_PLACEHOLDER, MEASUREMENT_PLACEHOLDER, NoiseAnalysisView, SimulationView,
};
use teleport_ui::params::{ANGLE_RANGE, NOISE_RANGE, SHOT_CHOICES};
use teleport_ui::{PlotSpec, StepNavigator};
use yew::prelude::*;

use crate::plotly;

/// Sliders, shot count and action buttons.
#[derive(Properties, PartialEq)]
pub struct ControlPanelProps {
    pub angle: f64,
    pub angle_label: String,
    pub noise: f64,
    pub noise_label: String,
    pub shots: u32,
    pub on_angle: Callback<String>,
    pub on_noise: Callback<String>,
    pub on_shots: Callback<String>,
    pub simulate_label: &'static str,
    pub simulate_busy: bool,
    pub simulate_pulse: bool,
    pub analysis_label: &'static str,
    pub analysis_busy: bool,
    pub analysis_pulse: bool,
    pub on_simulate: Callback<()>,
    pub on_analysis: Callback<()>,
    pub on_reset: Callback<()>,
}

fn slider_input(on_change: &Callback<String>) -> Callback<InputEvent> {
    let on_change = on_change.clone();
    Callback::from(move |e: InputEvent| {
        let target: web_sys::HtmlInputElement = e.target_unchecked_into();
        on_change.emit(target.value());
    })
}

fn action_button_class(busy: bool, pulse: bool) -> Classes {
    classes!(
        "action-button",
        busy.then_some("busy"),
        pulse.then_some("success-pulse")
    )
}

#[function_component(ControlPanel)]
pub fn control_panel(props: &ControlPanelProps) -> Html {
    let on_shots = {
        let on_shots = props.on_shots.clone();
        Callback::from(move |e: Event| {
            let target: web_sys::HtmlSelectElement = e.target_unchecked_into();
            on_shots.emit(target.value());
        })
    };
    let on_simulate = {
        let cb = props.on_simulate.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_analysis = {
        let cb = props.on_analysis.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_reset = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <div class="panel control-panel">
            <div class="panel-header">
                <h2>{ "Controls" }</h2>
            </div>
            <div class="panel-content">
                <div class="control">
                    <label for="psi_angle">{ "State angle θ" }</label>
                    <input
                        id="psi_angle"
                        type="range"
                        min={ANGLE_RANGE.0.to_string()}
                        max={ANGLE_RANGE.1.to_string()}
                        step={ANGLE_RANGE.2.to_string()}
                        value={props.angle.to_string()}
                        oninput={slider_input(&props.on_angle)}
                    />
                    <span id="angle_value" class="control-value">{ &props.angle_label }</span>
                </div>
                <div class="control">
                    <label for="noise_level">{ "Noise level" }</label>
                    <input
                        id="noise_level"
                        type="range"
                        min={NOISE_RANGE.0.to_string()}
                        max={NOISE_RANGE.1.to_string()}
                        step={NOISE_RANGE.2.to_string()}
                        value={props.noise.to_string()}
                        oninput={slider_input(&props.on_noise)}
                    />
                    <span id="noise_value" class="control-value">{ &props.noise_label }</span>
                </div>
                <div class="control">
                    <label for="shots">{ "Shots" }</label>
                    <select id="shots" onchange={on_shots}>
                        { for SHOT_CHOICES.iter().map(|&n| html! {
                            <option value={n.to_string()} selected={n == props.shots}>
                                { n }
                            </option>
                        })}
                    </select>
                </div>
                <div class="button-group">
                    <button
                        id="simulate_btn"
                        class={action_button_class(props.simulate_busy, props.simulate_pulse)}
                        disabled={props.simulate_busy}
                        onclick={on_simulate}
                    >
                        if props.simulate_busy {
                            <div class="loading"></div>
                        }
                        { props.simulate_label }
                    </button>
                    <button
                        id="noise_analysis_btn"
                        class={action_button_class(props.analysis_busy, props.analysis_pulse)}
                        disabled={props.analysis_busy}
                        onclick={on_analysis}
                    >
                        if props.analysis_busy {
                            <div class="loading"></div>
                        }
                        { props.analysis_label }
                    </button>
                    <button id="reset_btn" class="action-button reset" onclick={on_reset}>
                        { "🔄 Reset" }
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Step-by-step walkthrough with progress bar and circuit diagram.
#[derive(Properties, PartialEq)]
pub struct StepPanelProps {
    pub steps: StepNavigator,
    pub transitioning: bool,
    pub on_prev: Callback<()>,
    pub on_next: Callback<()>,
}

#[function_component(StepPanel)]
pub fn step_panel(props: &StepPanelProps) -> Html {
    let steps = &props.steps;
    let on_prev = {
        let cb = props.on_prev.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_next = {
        let cb = props.on_next.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <div class="panel step-panel">
            <div class="panel-header">
                <h2>{ "Protocol Steps" }</h2>
                <span id="step-counter" class="stats">{ steps.counter_label() }</span>
            </div>
            <div class="panel-content">
                <div class="progress-bar">
                    <div
                        id="progress-fill"
                        class="progress-fill"
                        style={format!("width: {:.2}%", steps.progress_percent())}
                    />
                </div>
                <p id="step-description" class="step-description">{ steps.description() }</p>
                <div
                    id="circuit-diagram"
                    class={classes!("circuit-diagram", props.transitioning.then_some("step-transition"))}
                >
                    <pre class="circuit">{ steps.circuit() }</pre>
                </div>
                <div class="button-group">
                    <button id="prev-step" disabled={!steps.can_prev()} onclick={on_prev}>
                        { "◀ Previous" }
                    </button>
                    <span class="current-step">
                        { "Current step: " }
                        <span id="current_step">{ steps.display_step() }</span>
                    </span>
                    <button id="next-step" disabled={!steps.can_next()} onclick={on_next}>
                        { "Next ▶" }
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Fallback histogram drawn with plain divs.
#[derive(Properties, PartialEq)]
pub struct MeasurementBarsProps {
    pub bars: Vec<MeasurementBar>,
}

#[function_component(MeasurementBars)]
pub fn measurement_bars(props: &MeasurementBarsProps) -> Html {
    html! {
        <>
            <div class="bars-title">
                <h4>{ "Measurement Outcomes Distribution" }</h4>
            </div>
            <div class="measurement-bars">
                { for props.bars.iter().map(|bar| html! {
                    <div class="measurement-bar">
                        <div class="bar-label">{ &bar.outcome }</div>
                        <div class="bar-container">
                            <div
                                class="bar-fill"
                                style={format!("height: {}px; background-color: {};", bar.height_px, bar.color)}
                            />
                        </div>
                        <div class="bar-value">{ bar.count }</div>
                        <div class="bar-percentage">{ format!("{}%", bar.percentage) }</div>
                    </div>
                })}
            </div>
        </>
    }
}

/// Draws `spec` with Plotly into a container div. Returns whether the
/// fallback should be shown instead.
#[hook]
fn use_plotly(container: NodeRef, spec: Option<PlotSpec>) -> bool {
    let fallback = use_state(|| !plotly::is_available());
    {
        let fallback = fallback.clone();
        use_effect_with(spec, move |spec| {
            if let Some(element) = container.cast::<web_sys::Element>() {
                // Plotly owns this div's children; yew never clears them.
                element.set_inner_html("");
                let Some(spec) = spec else {
                    return;
                };
                if !plotly::is_available() {
                    fallback.set(true);
                } else if let Err(e) = plotly::new_plot(&element, spec) {
                    gloo::console::log!("Plotly failed, using HTML fallback", e);
                    element.set_inner_html("");
                    fallback.set(true);
                } else {
                    fallback.set(false);
                }
            }
        });
    }
    *fallback
}

/// Bloch sphere, measurement histogram and metrics.
#[derive(Properties, PartialEq)]
pub struct ResultsPanelProps {
    pub view: Option<SimulationView>,
    pub fidelity: String,
    pub noise: String,
}

#[function_component(ResultsPanel)]
pub fn results_panel(props: &ResultsPanelProps) -> Html {
    let plot_ref = use_node_ref();
    let fallback = use_plotly(
        plot_ref.clone(),
        props.view.as_ref().map(|v| v.plot.clone()),
    );

    html! {
        <div class="panel results-panel">
            <div class="panel-header">
                <h2>{ "Results" }</h2>
            </div>
            <div class="panel-content">
                <div id="bloch_sphere" class="plot">
                    if let Some(view) = &props.view {
                        <img class="plot-image" src={view.bloch_uri.clone()} alt="Bloch Sphere" />
                    } else {
                        <div class="plot-placeholder">{ BLOCH_PLACEHOLDER }</div>
                    }
                </div>
                <div id="measurement_plot" class="plot">
                    <div ref={plot_ref} />
                    if let Some(view) = &props.view {
                        if fallback {
                            <MeasurementBars bars={view.bars.clone()} />
                        }
                    } else {
                        <div class="plot-placeholder">{ MEASUREMENT_PLACEHOLDER }</div>
                    }
                </div>
                <div class="metrics">
                    <div class="metric">
                        <span class="metric-label">{ "Fidelity" }</span>
                        <span id="fidelity_value" class="metric-value">{ &props.fidelity }</span>
                    </div>
                    <div class="metric">
                        <span class="metric-label">{ "Noise" }</span>
                        <span id="current_noise" class="metric-value">{ &props.noise }</span>
                    </div>
                </div>
            </div>
        </div>
    }
}

/// Fidelity-vs-noise curve. Rendered only after a successful analysis.
#[derive(Properties, PartialEq)]
pub struct NoiseAnalysisPanelProps {
    pub view: NoiseAnalysisView,
}

#[function_component(NoiseAnalysisPanel)]
pub fn noise_analysis_panel(props: &NoiseAnalysisPanelProps) -> Html {
    let plot_ref = use_node_ref();
    let fallback = use_plotly(plot_ref.clone(), Some(props.view.plot.clone()));

    html! {
        <div id="noise_analysis_plot" class="panel noise-panel">
            <div class="panel-header">
                <h2>{ "Noise Analysis" }</h2>
            </div>
            <div id="noise_plot" class="panel-content">
                <div ref={plot_ref} />
                if fallback {
                    if let Some(uri) = &props.view.image_uri {
                        <img class="plot-image" src={uri.clone()} alt="Noise Analysis" />
                    } else {
                        <table class="noise-table">
                            <tr><th>{ "Noise" }</th><th>{ "Fidelity" }</th></tr>
                            { for props.view.rows.iter().map(|(noise, fidelity)| html! {
                                <tr><td>{ noise }</td><td>{ fidelity }</td></tr>
                            })}
                        </table>
                    }
                }
            </div>
        </div>
    }
}
