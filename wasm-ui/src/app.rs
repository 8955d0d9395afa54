//! Main application component.

use gloo::timers::callback::Timeout;
use teleport_ui::{Controller, Endpoint};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::{ControlPanel, NoiseAnalysisPanel, ResultsPanel, StepPanel};

/// Delay before the first simulation runs on page load.
const AUTO_RUN_DELAY_MS: u32 = 1000;
const SUCCESS_PULSE_MS: u32 = 600;
const STEP_TRANSITION_MS: u32 = 500;

/// Set a flag and clear it again after `ms`.
fn flash(flag: &UseStateHandle<bool>, ms: u32) {
    flag.set(true);
    let flag = flag.clone();
    let _ = Timeout::new(ms, move || flag.set(false)).forget();
}

/// Log and alert a failed request.
fn report(message: &str) {
    gloo::console::error!(message);
    gloo::dialogs::alert(message);
}

/// Main application component.
#[function_component(App)]
pub fn app() -> Html {
    // The controller outlives individual renders; async completions write
    // into it and then force a re-render.
    let controller = use_mut_ref(Controller::new);
    let update = use_force_update();
    let simulate_pulse = use_state(|| false);
    let analysis_pulse = use_state(|| false);
    let step_transition = use_state(|| false);

    let on_angle = {
        let controller = controller.clone();
        let update = update.clone();
        Callback::from(move |text: String| {
            if let Err(e) = controller.borrow_mut().set_angle(&text) {
                gloo::console::warn!(e.to_string());
            }
            update.force_update();
        })
    };

    let on_noise = {
        let controller = controller.clone();
        let update = update.clone();
        Callback::from(move |text: String| {
            if let Err(e) = controller.borrow_mut().set_noise(&text) {
                gloo::console::warn!(e.to_string());
            }
            update.force_update();
        })
    };

    let on_shots = {
        let controller = controller.clone();
        let update = update.clone();
        Callback::from(move |text: String| {
            if let Err(e) = controller.borrow_mut().set_shots(&text) {
                gloo::console::warn!(e.to_string());
            }
            update.force_update();
        })
    };

    let on_simulate = {
        let controller = controller.clone();
        let update = update.clone();
        let pulse = simulate_pulse.clone();
        let transition = step_transition.clone();
        Callback::from(move |_: ()| {
            let Some(request) = controller.borrow_mut().begin(Endpoint::Simulate) else {
                return;
            };
            update.force_update();

            let controller = controller.clone();
            let update = update.clone();
            let pulse = pulse.clone();
            let transition = transition.clone();
            spawn_local(async move {
                let result = api::simulate(&request).await;
                let outcome = controller.borrow_mut().finish_simulation(result);
                update.force_update();
                match outcome {
                    Ok(()) => {
                        flash(&transition, STEP_TRANSITION_MS);
                        flash(&pulse, SUCCESS_PULSE_MS);
                    }
                    Err(message) => report(&message),
                }
            });
        })
    };

    let on_analysis = {
        let controller = controller.clone();
        let update = update.clone();
        let pulse = analysis_pulse.clone();
        Callback::from(move |_: ()| {
            let Some(request) = controller.borrow_mut().begin(Endpoint::NoiseAnalysis) else {
                return;
            };
            update.force_update();

            let controller = controller.clone();
            let update = update.clone();
            let pulse = pulse.clone();
            spawn_local(async move {
                let result = api::noise_analysis(&request).await;
                let outcome = controller.borrow_mut().finish_noise_analysis(result);
                update.force_update();
                match outcome {
                    Ok(()) => flash(&pulse, SUCCESS_PULSE_MS),
                    Err(message) => report(&message),
                }
            });
        })
    };

    let on_reset = {
        let controller = controller.clone();
        let update = update.clone();
        Callback::from(move |_: ()| {
            controller.borrow_mut().reset();
            update.force_update();
        })
    };

    let on_prev = {
        let controller = controller.clone();
        let transition = step_transition.clone();
        let update = update.clone();
        Callback::from(move |_: ()| {
            if controller.borrow_mut().steps.prev() {
                flash(&transition, STEP_TRANSITION_MS);
                update.force_update();
            }
        })
    };

    let on_next = {
        let controller = controller.clone();
        let transition = step_transition.clone();
        let update = update.clone();
        Callback::from(move |_: ()| {
            if controller.borrow_mut().steps.next() {
                flash(&transition, STEP_TRANSITION_MS);
                update.force_update();
            }
        })
    };

    // Run one simulation shortly after the page mounts.
    {
        let on_simulate = on_simulate.clone();
        use_effect_with((), move |_| {
            let handle = Timeout::new(AUTO_RUN_DELAY_MS, move || on_simulate.emit(()));
            move || {
                handle.cancel();
            }
        });
    }

    let page = controller.borrow();
    html! {
        <div class="app">
            <header class="header">
                <div class="header-left">
                    <h1>{ "Quantum Teleportation" }</h1>
                    <p class="subtitle">{ "Send |ψ⟩ across a Bell pair, one step at a time" }</p>
                </div>
            </header>

            <main class="main">
                <div class="panels">
                    <ControlPanel
                        angle={page.params.psi_angle}
                        angle_label={page.angle_label.clone()}
                        noise={page.params.noise_level}
                        noise_label={page.noise_label.clone()}
                        shots={page.params.shots}
                        on_angle={on_angle}
                        on_noise={on_noise}
                        on_shots={on_shots}
                        simulate_label={page.button_label(Endpoint::Simulate)}
                        simulate_busy={page.is_running(Endpoint::Simulate)}
                        simulate_pulse={*simulate_pulse}
                        analysis_label={page.button_label(Endpoint::NoiseAnalysis)}
                        analysis_busy={page.is_running(Endpoint::NoiseAnalysis)}
                        analysis_pulse={*analysis_pulse}
                        on_simulate={on_simulate.clone()}
                        on_analysis={on_analysis}
                        on_reset={on_reset}
                    />

                    <StepPanel
                        steps={page.steps.clone()}
                        transitioning={*step_transition}
                        on_prev={on_prev}
                        on_next={on_next}
                    />

                    <ResultsPanel
                        view={page.simulation.clone()}
                        fidelity={page.fidelity_text().to_string()}
                        noise={page.noise_text().to_string()}
                    />
                </div>

                if let Some(view) = &page.noise_analysis {
                    <NoiseAnalysisPanel view={view.clone()} />
                }
            </main>

            <footer class="footer">
                <div class="footer-row">
                    <span>{ "Simulation runs on the server | charts by Plotly when available" }</span>
                </div>
                <div class="footer-row">
                    <span class="footer-left">{ "MIT License" }</span>
                    <span class="footer-build">
                        { format!("Build: {}@{} {}", env!("BUILD_HOST"), env!("BUILD_COMMIT"), env!("BUILD_TIMESTAMP")) }
                    </span>
                </div>
            </footer>
        </div>
    }
}
