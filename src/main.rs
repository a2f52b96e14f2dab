use anyhow::Result;
use cgmath::Vector3;

use gtags::scene::SceneGraph;

/// Launches the standalone tool with a small demo hierarchy, roughly the
/// shape of a set an artist would run GTags over.
fn main() -> Result<()> {
    env_logger::init();

    let mut app = gtags::default();
    build_sample_scene(app.scene_mut());
    app.tool_mut().open();
    app.run();

    Ok(())
}

fn build_sample_scene(scene: &mut SceneGraph) {
    let set = scene.add_transform("Set_Village", None);

    let env = scene.add_transform("Env", Some(set));
    let house = scene.add_transform("House_A", Some(env));
    scene.add_shape("House_AShape", house);
    scene.node_mut(house).set_translation(Vector3::new(-2.0, 0.0, 1.0));

    let well = scene.add_transform("Well", Some(env));
    scene.add_shape("WellShape", well);

    let props = scene.add_transform("Props", Some(set));
    let cart = scene.add_transform("Cart", Some(props));
    scene.add_shape("CartShape", cart);
    scene.node_mut(cart).set_translation(Vector3::new(1.5, 0.0, -0.5));
    let barrel = scene.add_transform("Barrel_01", Some(props));
    scene.add_shape("Barrel_01Shape", barrel);
    scene.node_mut(barrel).translate(Vector3::new(0.4, 0.0, 0.8));

    // An empty group: still a valid tagging target on its own.
    scene.add_transform("Setdress_WIP", Some(set));

    scene.select(set);
}
